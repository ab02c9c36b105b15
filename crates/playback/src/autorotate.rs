//! Idle spin of the globe

use crate::ticker::ElapsedTicker;

/// The parts of the globe projection the core drives
pub trait Projection {
    /// `[lambda, phi, gamma]` in degrees
    fn rotation(&self) -> [f64; 3];
    fn set_rotation(&mut self, rotation: [f64; 3]);
    fn set_scale(&mut self, scale: f64);
    fn set_translate(&mut self, translate: [f64; 2]);
}

/// Wrap a longitude into `[-180, 180)`
pub fn wrap_longitude(lambda: f64) -> f64 {
    (lambda + 180.0).rem_euclid(360.0) - 180.0
}

/// Rotates the globe at a fixed angular speed, suspended while dragged
#[derive(Debug, Clone, PartialEq)]
pub struct Autorotate {
    degrees_per_second: f64,
    paused: bool,
    ticker: ElapsedTicker,
}

impl Autorotate {
    pub fn new(degrees_per_second: f64) -> Self {
        Self {
            degrees_per_second,
            paused: false,
            ticker: ElapsedTicker::new(),
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance the rotation for a draw at `now`. Returns the new longitude
    /// when the globe was turned.
    pub fn on_draw(&mut self, now: f64, projection: &mut impl Projection) -> Option<f64> {
        if self.paused {
            self.ticker.reset(now);
            return None;
        }

        let elapsed = self.ticker.tick(now)?;
        let mut rotation = projection.rotation();
        rotation[0] = wrap_longitude(rotation[0] + self.degrees_per_second * elapsed / 1000.0);
        projection.set_rotation(rotation);
        Some(rotation[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestProjection {
        rotation: [f64; 3],
    }

    impl Projection for TestProjection {
        fn rotation(&self) -> [f64; 3] {
            self.rotation
        }
        fn set_rotation(&mut self, rotation: [f64; 3]) {
            self.rotation = rotation;
        }
        fn set_scale(&mut self, _scale: f64) {}
        fn set_translate(&mut self, _translate: [f64; 2]) {}
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert_eq!(wrap_longitude(180.0), -180.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(900.0), -180.0);
    }

    #[test]
    fn test_first_draw_only_records_time() {
        let mut projection = TestProjection {
            rotation: [100.0, -10.0, 0.0],
        };
        let mut spin = Autorotate::new(5.0);

        assert_eq!(spin.on_draw(0.0, &mut projection), None);
        assert_eq!(projection.rotation, [100.0, -10.0, 0.0]);

        assert_eq!(spin.on_draw(2000.0, &mut projection), Some(110.0));
        assert_eq!(projection.rotation, [110.0, -10.0, 0.0]);
    }

    #[test]
    fn test_rotation_wraps_past_antimeridian() {
        let mut projection = TestProjection {
            rotation: [175.0, 0.0, 0.0],
        };
        let mut spin = Autorotate::new(5.0);
        spin.on_draw(0.0, &mut projection);

        spin.on_draw(2000.0, &mut projection);
        assert_eq!(projection.rotation[0], -175.0);
    }

    #[test]
    fn test_no_rotation_while_dragged() {
        let mut projection = TestProjection::default();
        let mut spin = Autorotate::new(10.0);
        spin.on_draw(0.0, &mut projection);

        spin.pause();
        assert!(spin.is_paused());
        for now in [1000.0, 5000.0, 9000.0] {
            assert_eq!(spin.on_draw(now, &mut projection), None);
        }
        assert_eq!(projection.rotation[0], 0.0);

        // Resumes from the last paused draw, not from before the drag
        spin.resume();
        assert_eq!(spin.on_draw(9500.0, &mut projection), Some(5.0));
    }
}
