//! Globe motion: spin, centering and scale, driven by draw callbacks

use gaia_config::GlobeConfig;
use gaia_shared::events::GlobeEvent;

use crate::autorotate::{Autorotate, Projection};
use crate::viewport::{Autocenter, Autoscale, ViewportPadding};

/// Owns the per-globe behaviours and routes canvas events to them
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeController {
    autorotate: Autorotate,
    autocenter: Autocenter,
    autoscale: Autoscale,
    window_size: (f64, f64),
}

impl GlobeController {
    pub fn new(config: &GlobeConfig, window_size: (f64, f64)) -> Self {
        let padding = ViewportPadding::new(config.extra_width, config.extra_height);
        Self {
            autorotate: Autorotate::new(config.degrees_per_second),
            autocenter: Autocenter::new(padding),
            autoscale: Autoscale::new(padding),
            window_size,
        }
    }

    /// Called once when the renderer initializes
    pub fn on_init(&mut self, projection: &mut impl Projection) {
        self.autocenter.on_init();
        self.autoscale.on_init(self.window_size, projection);
    }

    /// Called on every draw. Returns a new canvas size when one must be applied.
    pub fn on_draw(&mut self, now: f64, projection: &mut impl Projection) -> Option<(f64, f64)> {
        let resized = self.autocenter.on_draw(self.window_size, projection);
        self.autorotate.on_draw(now, projection);
        resized
    }

    pub fn handle_event(&mut self, event: GlobeEvent) {
        match event {
            GlobeEvent::DragStart => self.autorotate.pause(),
            GlobeEvent::DragEnd => self.autorotate.resume(),
            GlobeEvent::Resized { width, height } => {
                self.window_size = (width, height);
                self.autocenter.on_resize();
            }
        }
    }

    pub fn autorotate(&self) -> &Autorotate {
        &self.autorotate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestProjection {
        rotation: [f64; 3],
        scale: f64,
        translate: [f64; 2],
    }

    impl Projection for TestProjection {
        fn rotation(&self) -> [f64; 3] {
            self.rotation
        }
        fn set_rotation(&mut self, rotation: [f64; 3]) {
            self.rotation = rotation;
        }
        fn set_scale(&mut self, scale: f64) {
            self.scale = scale;
        }
        fn set_translate(&mut self, translate: [f64; 2]) {
            self.translate = translate;
        }
    }

    #[test]
    fn test_init_then_draws() {
        let mut globe = GlobeController::new(&GlobeConfig::default(), (1000.0, 720.0));
        let mut projection = TestProjection::default();

        globe.on_init(&mut projection);
        assert_eq!(projection.scale, 300.0);

        assert_eq!(globe.on_draw(0.0, &mut projection), Some((1000.0, 600.0)));
        assert_eq!(projection.translate, [500.0, 300.0]);
        assert_eq!(projection.rotation[0], 0.0);

        assert_eq!(globe.on_draw(1000.0, &mut projection), None);
        assert_eq!(projection.rotation[0], 5.0);
    }

    #[test]
    fn test_events_route_to_behaviours() {
        let mut globe = GlobeController::new(&GlobeConfig::default(), (1000.0, 720.0));
        let mut projection = TestProjection::default();
        globe.on_init(&mut projection);
        globe.on_draw(0.0, &mut projection);

        globe.handle_event(GlobeEvent::DragStart);
        assert!(globe.autorotate().is_paused());
        globe.on_draw(4000.0, &mut projection);
        assert_eq!(projection.rotation[0], 0.0);
        globe.handle_event(GlobeEvent::DragEnd);
        assert!(!globe.autorotate().is_paused());

        globe.handle_event(GlobeEvent::Resized {
            width: 400.0,
            height: 520.0,
        });
        assert_eq!(globe.on_draw(4000.0, &mut projection), Some((400.0, 400.0)));
        assert_eq!(projection.translate, [200.0, 200.0]);
    }
}
