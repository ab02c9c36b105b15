//! Input events forwarded from the page to the playback core

/// Events raised by the timeline scrubber (range input)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrubberEvent {
    DragStart,
    DragEnd,
    /// Slider committed a new value, in percent of the timeline
    Change { percent: f64 },
}

/// Events raised by the globe canvas
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlobeEvent {
    DragStart,
    DragEnd,
    Resized { width: f64, height: f64 },
}
