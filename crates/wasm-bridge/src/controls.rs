//! Page controls: the date label, the timeline slider and window resizes

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gaia_config::GlobeConfig;
use gaia_playback::{PlaybackDriver, PlaybackView};
use gaia_shared::events::{GlobeEvent, ScrubberEvent};
use gaia_shared::{GaiaError, GaiaResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, Window};

use crate::planet::Globe;

/// A registered DOM listener, removed again when dropped
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> GaiaResult<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

pub fn element_by_id(document: &Document, id: &str) -> GaiaResult<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| GaiaError::MissingElement { id: id.to_string() })
}

/// Date label and slider as the replay sees them
pub struct DomControls {
    date_label: Element,
    slider: HtmlInputElement,
}

impl DomControls {
    pub fn find(document: &Document, config: &GlobeConfig) -> GaiaResult<Self> {
        let date_label = element_by_id(document, &config.date_label_id)?;
        let slider = element_by_id(document, &config.slider_id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| GaiaError::MissingElement {
                id: config.slider_id.clone(),
            })?;
        Ok(Self { date_label, slider })
    }

    pub fn slider_percent(&self) -> f64 {
        self.slider.value_as_number()
    }
}

impl PlaybackView for DomControls {
    fn show_date(&mut self, label: &str) {
        self.date_label.set_text_content(Some(label));
    }

    fn set_slider_percent(&mut self, percent: f64) {
        self.slider.set_value_as_number(percent);
    }
}

/// Route slider gestures to the driver.
///
/// Pressing the slider holds playback until the pointer is released
/// anywhere on the page; releases that did not start on the slider are
/// ignored. A committed value scrubs.
pub fn wire_scrubber(
    window: &Window,
    controls: &Rc<RefCell<DomControls>>,
    driver: &Rc<RefCell<PlaybackDriver>>,
) -> GaiaResult<Vec<EventListener>> {
    let slider: EventTarget = controls.borrow().slider.clone().into();
    let dragging = Rc::new(Cell::new(false));

    let forward = |event: ScrubberEvent| {
        let controls = controls.clone();
        let driver = driver.clone();
        let dragging = dragging.clone();
        move |_: Event| {
            let starting = event == ScrubberEvent::DragStart;
            if !starting && !dragging.get() {
                return;
            }
            dragging.set(starting);
            driver
                .borrow_mut()
                .handle_scrubber(event, &mut *controls.borrow_mut());
        }
    };

    let change_controls = controls.clone();
    let change_driver = driver.clone();
    let on_change = move |_: Event| {
        let percent = change_controls.borrow().slider_percent();
        if percent.is_nan() {
            return;
        }
        change_driver
            .borrow_mut()
            .handle_scrubber(ScrubberEvent::Change { percent }, &mut *change_controls.borrow_mut());
    };

    Ok(vec![
        EventListener::new(&slider, "pointerdown", forward(ScrubberEvent::DragStart))?,
        EventListener::new(window, "pointerup", forward(ScrubberEvent::DragEnd))?,
        EventListener::new(&slider, "change", on_change)?,
    ])
}

/// Current `innerWidth`/`innerHeight` of the window
pub fn window_size(window: &Window) -> (f64, f64) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

/// Keep the globe centered as the window changes size
pub fn watch_resize(window: &Window, globe: &Rc<Globe>) -> GaiaResult<EventListener> {
    let globe = globe.clone();
    let target = window.clone();
    EventListener::new(window, "resize", move |_: Event| {
        let (width, height) = window_size(&target);
        log::debug!("Window resized to {width}x{height}");
        globe.handle_event(GlobeEvent::Resized { width, height });
    })
}
