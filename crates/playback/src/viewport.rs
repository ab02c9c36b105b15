//! Canvas sizing, centering and initial scale

use crate::autorotate::Projection;

/// Offsets added to the window size before the globe is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportPadding {
    pub extra_width: f64,
    pub extra_height: f64,
}

impl ViewportPadding {
    pub fn new(extra_width: f64, extra_height: f64) -> Self {
        Self {
            extra_width,
            extra_height,
        }
    }

    /// Window inner size plus the extras, never negative
    pub fn adjusted_size(&self, window_width: f64, window_height: f64) -> (f64, f64) {
        (
            (window_width + self.extra_width).max(0.0),
            (window_height + self.extra_height).max(0.0),
        )
    }
}

/// Keeps the globe centred in a canvas that tracks the window size
#[derive(Debug, Clone, PartialEq)]
pub struct Autocenter {
    padding: ViewportPadding,
    needs_centering: bool,
}

impl Autocenter {
    pub fn new(padding: ViewportPadding) -> Self {
        Self {
            padding,
            needs_centering: false,
        }
    }

    pub fn on_init(&mut self) {
        self.needs_centering = true;
    }

    pub fn on_resize(&mut self) {
        self.needs_centering = true;
    }

    pub fn needs_centering(&self) -> bool {
        self.needs_centering
    }

    /// Recentre if a resize is pending. Returns the canvas size to apply.
    pub fn on_draw(
        &mut self,
        window_size: (f64, f64),
        projection: &mut impl Projection,
    ) -> Option<(f64, f64)> {
        if !self.needs_centering {
            return None;
        }
        self.needs_centering = false;

        let (width, height) = self.padding.adjusted_size(window_size.0, window_size.1);
        projection.set_translate([width / 2.0, height / 2.0]);
        log::debug!("Centered globe in {width}x{height} canvas");
        Some((width, height))
    }
}

/// Fits the globe to the smaller viewport dimension on start-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autoscale {
    padding: ViewportPadding,
}

impl Autoscale {
    pub fn new(padding: ViewportPadding) -> Self {
        Self { padding }
    }

    pub fn on_init(&self, window_size: (f64, f64), projection: &mut impl Projection) -> f64 {
        let (width, height) = self.padding.adjusted_size(window_size.0, window_size.1);
        let scale = width.min(height) / 2.0;
        projection.set_scale(scale);
        scale
    }
}
