// Browser tests for the page bridge
// Run with: wasm-pack test --headless --firefox crates/wasm-bridge
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gaia_config::GlobeConfig;
use gaia_playback::PlaybackView;
use gaia_wasm::controls::{window_size, DomControls};
use gaia_wasm::soundscape::LoadTimeout;
use gaia_wasm::Gaia;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::HtmlInputElement;

wasm_bindgen_test_configure!(run_in_browser);

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn mount_controls(config: &GlobeConfig) -> web_sys::Document {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();

    let label = document.create_element("div").unwrap();
    label.set_id(&config.date_label_id);
    body.append_child(&label).unwrap();

    let slider: HtmlInputElement = document.create_element("input").unwrap().dyn_into().unwrap();
    slider.set_type("range");
    slider.set_id(&config.slider_id);
    body.append_child(&slider).unwrap();

    document
}

#[wasm_bindgen_test]
fn test_controls_mirror_playback_position() {
    let config = GlobeConfig {
        date_label_id: "test-date".to_string(),
        slider_id: "test-slider".to_string(),
        ..GlobeConfig::default()
    };
    let document = mount_controls(&config);

    let mut controls = DomControls::find(&document, &config).unwrap();
    controls.show_date("Mar 07 2019 04:05 UTC");
    controls.set_slider_percent(42.0);

    let label = document.get_element_by_id("test-date").unwrap();
    assert_eq!(label.text_content().as_deref(), Some("Mar 07 2019 04:05 UTC"));
    assert_eq!(controls.slider_percent(), 42.0);
}

#[wasm_bindgen_test]
fn test_missing_slider_is_reported() {
    let config = GlobeConfig {
        slider_id: "no-such-slider".to_string(),
        ..GlobeConfig::default()
    };
    let document = web_sys::window().unwrap().document().unwrap();
    assert!(DomControls::find(&document, &config).is_err());
}

#[wasm_bindgen_test]
fn test_gaia_config_handling() {
    assert!(Gaia::new(None).is_ok());
    assert!(Gaia::new(Some(r#"{"playback": {"replay_duration_ms": 60000}}"#.to_string())).is_ok());
    assert!(Gaia::new(Some("{not json".to_string())).is_err());
    assert!(Gaia::new(Some(r#"{"playback": {"replay_duration_ms": -1}}"#.to_string())).is_err());

    let gaia = Gaia::new(None).unwrap();
    assert_eq!(gaia.current_time(), None);
    assert!(!gaia.is_paused());
}

#[wasm_bindgen_test]
fn test_window_size_is_positive() {
    let (width, height) = window_size(&web_sys::window().unwrap());
    assert!(width > 0.0);
    assert!(height > 0.0);
}

#[wasm_bindgen_test]
async fn test_failed_start_leaves_gaia_usable() {
    let gaia = Gaia::new(Some(r#"{"globe": {"canvas_id": "no-such-canvas"}}"#.to_string())).unwrap();

    assert!(gaia.start().await.is_err());
    assert!(!gaia.is_loading());

    gaia.pause();
    gaia.resume();
    gaia.scrub(50.0);
    assert_eq!(gaia.current_date(), None);
    gaia.stop();

    assert!(gaia.start().await.is_err());
}

#[wasm_bindgen_test]
async fn test_armed_load_timeout_rejects() {
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    let reject = Closure::<dyn FnMut(JsValue)>::new(move |_| flag.set(true));

    let _timeout = LoadTimeout::arm(reject.as_ref().unchecked_ref(), 5, "too slow").unwrap();
    sleep(50).await;
    assert!(fired.get());
}

#[wasm_bindgen_test]
async fn test_dropped_load_timeout_is_cleared() {
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    let reject = Closure::<dyn FnMut(JsValue)>::new(move |_| flag.set(true));

    let timeout = LoadTimeout::arm(reject.as_ref().unchecked_ref(), 5, "too slow");
    assert!(timeout.is_some());
    drop(timeout);

    sleep(50).await;
    assert!(!fired.get());
}
