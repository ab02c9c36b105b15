//! Background soundscape on Tone.js: one sample replayed on a loop

use gaia_config::AudioConfig;
use gaia_shared::{GaiaError, GaiaResult};
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Tone)]
    #[derive(Clone)]
    type Sampler;

    #[wasm_bindgen(constructor, js_namespace = Tone)]
    fn new(samples: &Object, onload: &Function) -> Sampler;

    #[wasm_bindgen(method, js_name = toMaster)]
    fn to_master(this: &Sampler) -> Sampler;

    #[wasm_bindgen(method, js_name = triggerAttack)]
    fn trigger_attack(this: &Sampler, note: &str, time: f64);

    #[wasm_bindgen(js_namespace = Tone)]
    type Loop;

    #[wasm_bindgen(constructor, js_namespace = Tone)]
    fn new(callback: &Function, interval: &str) -> Loop;

    #[wasm_bindgen(method)]
    fn start(this: &Loop, time: f64) -> Loop;

    #[wasm_bindgen(method)]
    fn dispose(this: &Loop);

    #[wasm_bindgen(js_namespace = ["Tone", "Transport"], js_name = start)]
    fn start_transport();
}

/// A loaded sample scheduled on a loop, silent until [`play`](Self::play)
pub struct Soundscape {
    _sampler: Sampler,
    audio_loop: Loop,
    _callback: Closure<dyn FnMut(f64)>,
}

impl Soundscape {
    /// Load the sample and schedule the loop. Fails if the sample has not
    /// loaded within `load_timeout_ms`.
    pub async fn load(config: &AudioConfig) -> GaiaResult<Self> {
        let samples = Object::new();
        Reflect::set(
            &samples,
            &JsValue::from_str(&config.tone),
            &JsValue::from_str(&config.sample_url),
        )?;

        let reason = format!(
            "Timed out after {}ms loading {}",
            config.load_timeout_ms, config.sample_url
        );
        let mut sampler = None;
        let mut timeout = None;
        let loaded = Promise::new(&mut |resolve, reject| {
            sampler = Some(Sampler::new(&samples, &resolve).to_master());
            timeout = LoadTimeout::arm(&reject, config.load_timeout_ms, &reason);
        });
        let sampler = sampler.ok_or_else(|| GaiaError::Internal {
            message: "Promise executor did not run".to_string(),
        })?;

        let outcome = JsFuture::from(loaded).await;
        drop(timeout);
        outcome.map_err(|e| GaiaError::AudioLoad {
            message: e
                .as_string()
                .unwrap_or_else(|| format!("Failed to load {}", config.sample_url)),
        })?;

        let tone = config.tone.clone();
        let player = sampler.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            player.trigger_attack(&tone, time);
        });
        let audio_loop = Loop::new(callback.as_ref().unchecked_ref(), &config.loop_interval);
        audio_loop.start(0.0);

        log::info!(
            "Loaded sample {} looping every {}",
            config.sample_url,
            config.loop_interval
        );
        Ok(Self {
            _sampler: sampler,
            audio_loop,
            _callback: callback,
        })
    }

    /// Start the transport; the loop begins sounding
    pub fn play(&self) {
        start_transport();
    }
}

impl Drop for Soundscape {
    // The loop must not fire into the callback once it is freed
    fn drop(&mut self) {
        self.audio_loop.dispose();
    }
}

/// A pending `setTimeout` rejecting a load; cancelled when dropped
pub struct LoadTimeout {
    window: web_sys::Window,
    handle: i32,
}

impl LoadTimeout {
    /// Call `reject` with `reason` after `timeout_ms`. `None` if no timer
    /// could be set; the load then waits indefinitely.
    pub fn arm(reject: &Function, timeout_ms: u32, reason: &str) -> Option<Self> {
        let window = web_sys::window()?;
        let reject = reject.clone();
        let reason = JsValue::from_str(reason);
        let on_timeout = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &reason);
        });
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            on_timeout.unchecked_ref(),
            timeout_ms.min(i32::MAX as u32) as i32,
        ) {
            Ok(handle) => Some(Self { window, handle }),
            Err(e) => {
                log::warn!("Could not arm audio load timeout: {e:?}");
                None
            }
        }
    }
}

impl Drop for LoadTimeout {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}
