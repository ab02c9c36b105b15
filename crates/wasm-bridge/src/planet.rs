//! Bindings to the planetary.js globe renderer
//!
//! planetary.js owns the canvas and its own draw timer. We hand it the stock
//! earth, pings, zoom and drag plugins plus one plugin of our own that feeds
//! its init and draw hooks into [`GlobeController`].

use std::cell::RefCell;
use std::rc::Rc;

use gaia_config::{GaiaConfig, GlobeConfig};
use gaia_playback::{Clock, GlobeController, PingSink, Projection, WallClock};
use gaia_shared::events::GlobeEvent;
use gaia_shared::{GaiaError, GaiaResult, Ping};
use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    /// A planetary.js planet instance
    #[derive(Clone)]
    pub type Planet;

    #[wasm_bindgen(js_namespace = planetaryjs, js_name = planet)]
    fn create_planet() -> Planet;

    #[wasm_bindgen(method, js_name = loadPlugin)]
    fn load_plugin(this: &Planet, plugin: &JsValue);

    #[wasm_bindgen(method, js_name = onInit)]
    fn on_init(this: &Planet, hook: &JsValue);

    #[wasm_bindgen(method, js_name = onDraw)]
    fn on_draw(this: &Planet, hook: &JsValue);

    #[wasm_bindgen(method)]
    fn draw(this: &Planet, canvas: &HtmlCanvasElement);

    #[wasm_bindgen(method, getter)]
    fn projection(this: &Planet) -> GeoProjection;

    #[wasm_bindgen(method, getter)]
    fn plugins(this: &Planet) -> Object;

    /// d3 geo projection used by the planet
    #[derive(Clone)]
    pub type GeoProjection;

    #[wasm_bindgen(method, js_name = rotate)]
    fn get_rotate(this: &GeoProjection) -> Array;

    #[wasm_bindgen(method, js_name = rotate)]
    fn set_rotate(this: &GeoProjection, rotation: &Array) -> JsValue;

    #[wasm_bindgen(method, js_name = scale)]
    fn set_scale(this: &GeoProjection, scale: f64) -> JsValue;

    #[wasm_bindgen(method, js_name = translate)]
    fn set_translate(this: &GeoProjection, translate: &Array) -> JsValue;

    /// The pings plugin, reachable as `planet.plugins.pings`
    pub type PingsPlugin;

    #[wasm_bindgen(method)]
    fn add(this: &PingsPlugin, lng: f64, lat: f64, options: &JsValue);

    #[wasm_bindgen(js_namespace = ["planetaryjs", "plugins"], js_name = earth)]
    fn earth_plugin(options: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = ["planetaryjs", "plugins"], js_name = pings)]
    fn pings_plugin() -> JsValue;

    #[wasm_bindgen(js_namespace = ["planetaryjs", "plugins"], js_name = zoom)]
    fn zoom_plugin(options: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = ["planetaryjs", "plugins"], js_name = drag)]
    fn drag_plugin(options: &JsValue) -> JsValue;
}

#[derive(Serialize)]
struct EarthOptions<'a> {
    topojson: TopoJsonOptions<'a>,
    oceans: FillOptions,
    land: FillOptions,
    borders: StrokeOptions,
}

#[derive(Serialize)]
struct TopoJsonOptions<'a> {
    file: &'a str,
}

#[derive(Serialize)]
struct FillOptions {
    fill: String,
}

#[derive(Serialize)]
struct StrokeOptions {
    stroke: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ZoomOptions {
    scale_extent: [f64; 2],
}

/// Serialize to a plain JS object (maps become objects, not `Map`s)
fn to_js<T: Serialize>(value: &T) -> GaiaResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| GaiaError::JsInterop {
            message: format!("Failed to convert plugin options: {e}"),
        })
}

/// [`Projection`] over the planet's live d3 projection
pub struct PlanetProjection {
    projection: GeoProjection,
}

impl PlanetProjection {
    pub fn of(planet: &Planet) -> Self {
        Self {
            projection: planet.projection(),
        }
    }
}

impl Projection for PlanetProjection {
    fn rotation(&self) -> [f64; 3] {
        let current = self.projection.get_rotate();
        let axis = |i: u32| current.get(i).as_f64().unwrap_or(0.0);
        [axis(0), axis(1), axis(2)]
    }

    fn set_rotation(&mut self, rotation: [f64; 3]) {
        let value: Array = rotation.iter().copied().map(JsValue::from_f64).collect();
        self.projection.set_rotate(&value);
    }

    fn set_scale(&mut self, scale: f64) {
        self.projection.set_scale(scale);
    }

    fn set_translate(&mut self, translate: [f64; 2]) {
        let value: Array = translate.iter().copied().map(JsValue::from_f64).collect();
        self.projection.set_translate(&value);
    }
}

/// [`PingSink`] that hands pings to the pings plugin
pub struct PlanetPings {
    plugin: PingsPlugin,
}

impl PlanetPings {
    /// Only valid once the planet has been drawn, which is when plugins attach
    pub fn of(planet: &Planet) -> GaiaResult<Self> {
        let plugin = Reflect::get(&planet.plugins(), &JsValue::from_str("pings"))?;
        if plugin.is_undefined() {
            return Err(GaiaError::JsInterop {
                message: "pings plugin is not loaded".to_string(),
            });
        }
        Ok(Self {
            plugin: plugin.unchecked_into(),
        })
    }
}

impl PingSink for PlanetPings {
    fn emit(&mut self, ping: Ping) {
        match serde_wasm_bindgen::to_value(&ping.style) {
            Ok(options) => self.plugin.add(ping.lng, ping.lat, &options),
            Err(e) => log::error!("Dropping ping at ({}, {}): {e}", ping.lng, ping.lat),
        }
    }
}

/// A planet with its plugins loaded and drawing to the canvas
pub struct Globe {
    planet: Planet,
    controller: Rc<RefCell<GlobeController>>,
}

impl Globe {
    /// Build the planet, load all plugins, set the initial rotation and start
    /// drawing on `canvas`.
    pub fn draw_on(
        config: &GaiaConfig,
        canvas: HtmlCanvasElement,
        window_size: (f64, f64),
    ) -> GaiaResult<Self> {
        let planet = create_planet();
        let controller = Rc::new(RefCell::new(GlobeController::new(
            &config.globe,
            window_size,
        )));

        planet.load_plugin(&motion_plugin(controller.clone(), canvas.clone()));
        planet.load_plugin(&earth_plugin(&earth_options(
            &config.globe,
            &config.sources.topology_url,
        )?));
        planet.load_plugin(&pings_plugin());
        planet.load_plugin(&zoom_plugin(&to_js(&ZoomOptions {
            scale_extent: config.globe.scale_extent,
        })?));
        planet.load_plugin(&drag_plugin(&drag_options(&controller)?));

        PlanetProjection::of(&planet).set_rotation(config.globe.initial_rotation);
        planet.draw(&canvas);

        log::info!("Globe drawing on #{}", config.globe.canvas_id);
        Ok(Self { planet, controller })
    }

    pub fn pings(&self) -> GaiaResult<PlanetPings> {
        PlanetPings::of(&self.planet)
    }

    pub fn handle_event(&self, event: GlobeEvent) {
        self.controller.borrow_mut().handle_event(event);
    }
}

fn earth_options(globe: &GlobeConfig, topology_url: &str) -> GaiaResult<JsValue> {
    to_js(&EarthOptions {
        topojson: TopoJsonOptions { file: topology_url },
        oceans: FillOptions {
            fill: globe.ocean_fill.to_hex(),
        },
        land: FillOptions {
            fill: globe.land_fill.to_hex(),
        },
        borders: StrokeOptions {
            stroke: globe.border_stroke.to_hex(),
        },
    })
}

fn drag_options(controller: &Rc<RefCell<GlobeController>>) -> GaiaResult<JsValue> {
    let options = Object::new();
    for (key, event) in [
        ("onDragStart", GlobeEvent::DragStart),
        ("onDragEnd", GlobeEvent::DragEnd),
    ] {
        let controller = controller.clone();
        let handler = Closure::<dyn FnMut()>::new(move || {
            controller.borrow_mut().handle_event(event);
        });
        Reflect::set(&options, &JsValue::from_str(key), &handler.into_js_value())?;
    }
    Ok(options.into())
}

/// Plugin wiring planet hooks to the controller. Loaded first so centering
/// and scaling apply before anything is painted.
fn motion_plugin(controller: Rc<RefCell<GlobeController>>, canvas: HtmlCanvasElement) -> JsValue {
    Closure::once_into_js(move |planet: Planet| {
        let init_controller = controller.clone();
        let init_planet = planet.clone();
        let on_init = Closure::<dyn FnMut()>::new(move || {
            init_controller
                .borrow_mut()
                .on_init(&mut PlanetProjection::of(&init_planet));
        });
        planet.on_init(&on_init.into_js_value());

        let draw_planet = planet.clone();
        let on_draw = Closure::<dyn FnMut()>::new(move || {
            let now = WallClock.now_ms();
            let resized = controller
                .borrow_mut()
                .on_draw(now, &mut PlanetProjection::of(&draw_planet));
            if let Some((width, height)) = resized {
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
            }
        });
        planet.on_draw(&on_draw.into_js_value());
    })
}
