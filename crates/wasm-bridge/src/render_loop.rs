//! requestAnimationFrame loop driving the replay

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gaia_shared::{GaiaError, GaiaResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type AnimationClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls a frame callback once per animation frame until stopped
pub struct AnimationLoop {
    running: Rc<Cell<bool>>,
    animation_frame_id: Rc<Cell<Option<i32>>>,
    animation_closure: AnimationClosure,
}

impl AnimationLoop {
    /// Schedule the first frame. `on_frame` receives the rAF timestamp.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> GaiaResult<Self> {
        let running = Rc::new(Cell::new(true));
        let animation_frame_id = Rc::new(Cell::new(None));
        let animation_closure: AnimationClosure = Rc::new(RefCell::new(None));

        let frame_running = running.clone();
        let frame_id = animation_frame_id.clone();
        let frame_closure = animation_closure.clone();

        *animation_closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if !frame_running.get() {
                return;
            }

            on_frame(timestamp);

            // Schedule the next frame
            if let Some(closure) = frame_closure.borrow().as_ref() {
                match request_frame(closure) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(e) => {
                        log::error!("Failed to request animation frame: {e}");
                        frame_running.set(false);
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(closure) = animation_closure.borrow().as_ref() {
            animation_frame_id.set(Some(request_frame(closure)?));
        }

        log::info!("Animation loop started");
        Ok(Self {
            running,
            animation_frame_id,
            animation_closure,
        })
    }

    /// Cancel the pending frame and release the callback
    pub fn stop(&self) {
        self.running.set(false);

        if let Some(id) = self.animation_frame_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }

        // Breaks the closure's reference to itself
        self.animation_closure.borrow_mut().take();
        log::info!("Animation loop stopped");
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if self.animation_closure.borrow().is_some() {
            self.stop();
        }
    }
}

fn request_frame(closure: &Closure<dyn FnMut(f64)>) -> GaiaResult<i32> {
    let window = web_sys::window().ok_or_else(|| GaiaError::JsInterop {
        message: "No window object available".to_string(),
    })?;
    Ok(window.request_animation_frame(closure.as_ref().unchecked_ref())?)
}
