//! WASM bridge for Gaia
//! Wires the playback core to the page: planetary.js globe, Tone.js audio,
//! the date label and slider, and the animation frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use gaia_config::{ConfigParser, GaiaConfig};
use gaia_data::Timeline;
use gaia_playback::{Clock, PlaybackDriver, VisualMapping, WallClock};
use gaia_shared::{ErrorResponse, GaiaError, GaiaResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

pub mod controls;
pub mod loader;
pub mod planet;
pub mod render_loop;
pub mod soundscape;

use controls::{DomControls, EventListener};
use planet::Globe;
use render_loop::AnimationLoop;
use soundscape::Soundscape;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Gaia WASM module initialized");
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Everything alive while the page is replaying
struct Session {
    driver: Rc<RefCell<PlaybackDriver>>,
    controls: Rc<RefCell<DomControls>>,
    animation: AnimationLoop,
    _soundscape: Soundscape,
    _listeners: Vec<EventListener>,
}

struct GaiaState {
    config: GaiaConfig,
    globe: Option<Rc<Globe>>,
    session: Option<Session>,
    /// Set while `start` awaits the feed and audio; cleared by `stop`
    loading: bool,
    /// Bumped by every `start` and `stop`; a load finishing under an older
    /// value is discarded
    generation: u64,
}

/// The event globe as seen from JavaScript
#[wasm_bindgen]
pub struct Gaia {
    state: Rc<RefCell<GaiaState>>,
}

#[wasm_bindgen]
impl Gaia {
    /// Create with an optional JSON configuration; missing fields keep
    /// their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Gaia, JsValue> {
        let config = ConfigParser::parse_optional_json(config_json.as_deref())
            .map_err(|e| to_js_error(e, "new"))?;
        Ok(Gaia {
            state: Rc::new(RefCell::new(GaiaState {
                config,
                globe: None,
                session: None,
                loading: false,
                generation: 0,
            })),
        })
    }

    /// Draw the globe, then load the feed and audio and start the replay.
    /// On a failure the user is alerted and the globe keeps spinning
    /// without events. The other methods stay callable while loading.
    pub async fn start(&self) -> Result<(), JsValue> {
        start_session(self.state.clone())
            .await
            .map_err(|e| to_js_error(e, "start"))
    }

    pub fn pause(&self) {
        if let Some(driver) = self.driver() {
            driver.borrow_mut().pause();
        }
    }

    pub fn resume(&self) {
        if let Some(driver) = self.driver() {
            driver.borrow_mut().resume();
        }
    }

    /// Jump to `percent` of the timeline and move the slider there
    pub fn scrub(&self, percent: f64) {
        let state = self.state.borrow();
        if let Some(session) = &state.session {
            let mut controls = session.controls.borrow_mut();
            let mut driver = session.driver.borrow_mut();
            driver.scrub(percent, &mut *controls);
            driver.refresh_view(&mut *controls);
        }
    }

    /// Data time of the replay position, once started
    #[wasm_bindgen(js_name = currentTime)]
    pub fn current_time(&self) -> Option<f64> {
        self.driver().map(|driver| driver.borrow().current_time())
    }

    #[wasm_bindgen(js_name = currentDate)]
    pub fn current_date(&self) -> Option<String> {
        self.driver().map(|driver| driver.borrow().date_label())
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.driver()
            .is_some_and(|driver| driver.borrow().state().is_paused())
    }

    #[wasm_bindgen(js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Stop the frame loop, silence the audio and detach the controls. A
    /// start still loading is abandoned. The globe keeps spinning; `start`
    /// may be called again.
    pub fn stop(&self) {
        let session = {
            let mut state = self.state.borrow_mut();
            state.loading = false;
            state.generation += 1;
            state.session.take()
        };
        if let Some(session) = session {
            session.animation.stop();
            log::info!("Gaia stopped");
        }
    }
}

impl Gaia {
    fn driver(&self) -> Option<Rc<RefCell<PlaybackDriver>>> {
        self.state
            .borrow()
            .session
            .as_ref()
            .map(|session| session.driver.clone())
    }
}

async fn start_session(state: Rc<RefCell<GaiaState>>) -> GaiaResult<()> {
    let window = web_sys::window().ok_or_else(|| GaiaError::JsInterop {
        message: "No window object available".to_string(),
    })?;

    let (config, globe, generation) = {
        let mut state = state.borrow_mut();
        if state.session.is_some() || state.loading {
            log::warn!("Gaia already started");
            return Ok(());
        }
        let globe = match &state.globe {
            Some(globe) => globe.clone(),
            None => {
                let globe = Rc::new(draw_globe(&state.config, &window)?);
                state.globe = Some(globe.clone());
                globe
            }
        };
        state.loading = true;
        state.generation += 1;
        (state.config.clone(), globe, state.generation)
    };

    let loaded = loader::load_assets(&config).await;

    {
        let mut state = state.borrow_mut();
        if state.generation != generation {
            log::info!("Start abandoned: stopped while loading");
            return Ok(());
        }
        state.loading = false;
    }

    let session = loaded
        .and_then(|(timeline, soundscape)| {
            build_session(&config, &window, &globe, timeline, soundscape)
        })
        .map_err(|e| {
            loader::report_failure(&e);
            e
        })?;

    state.borrow_mut().session = Some(session);
    log::info!("Replay started");
    Ok(())
}

fn build_session(
    config: &GaiaConfig,
    window: &Window,
    globe: &Rc<Globe>,
    timeline: Timeline,
    soundscape: Soundscape,
) -> GaiaResult<Session> {
    let document = window.document().ok_or_else(|| GaiaError::JsInterop {
        message: "No document available".to_string(),
    })?;
    let controls = Rc::new(RefCell::new(DomControls::find(&document, &config.globe)?));

    let visuals = VisualMapping::from_config(&config.visuals);
    let driver = Rc::new(RefCell::new(PlaybackDriver::new(
        timeline,
        &config.playback,
        visuals,
        WallClock.now_ms(),
    )?));

    let mut listeners = controls::wire_scrubber(window, &controls, &driver)?;
    listeners.push(controls::watch_resize(window, globe)?);

    let mut pings = globe.pings()?;
    let frame_driver = driver.clone();
    let frame_controls = controls.clone();
    let animation = AnimationLoop::start(move |_| {
        frame_driver.borrow_mut().tick(
            WallClock.now_ms(),
            &mut pings,
            &mut *frame_controls.borrow_mut(),
        );
    })?;

    soundscape.play();

    Ok(Session {
        driver,
        controls,
        animation,
        _soundscape: soundscape,
        _listeners: listeners,
    })
}

fn draw_globe(config: &GaiaConfig, window: &Window) -> GaiaResult<Globe> {
    let document = window.document().ok_or_else(|| GaiaError::JsInterop {
        message: "No document available".to_string(),
    })?;
    let canvas = controls::element_by_id(&document, &config.globe.canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| GaiaError::MissingElement {
            id: config.globe.canvas_id.clone(),
        })?;

    Globe::draw_on(config, canvas, controls::window_size(window))
}

fn to_js_error(error: GaiaError, operation: &str) -> JsValue {
    JsValue::from_str(&ErrorResponse::new(error).with_context("gaia", operation).to_json())
}
