//! Time-series replay driver
//!
//! Maps wall-clock progress onto the data timeline. Each tick consumes the
//! wall-clock time since the previous tick (bounded, so a backgrounded tab
//! does not leap ahead), scales it so the whole timeline plays over a fixed
//! duration, and emits one ping for every record in the newly covered
//! stretch `(current, current + delta]`. Past the end, playback loops.

use gaia_config::PlaybackConfig;
use gaia_data::Timeline;
use gaia_shared::events::ScrubberEvent;
use gaia_shared::{EventRecord, GaiaResult, Ping};

use crate::date::DateLabel;
use crate::scale::LinearScale;
use crate::ticker::ElapsedTicker;
use crate::visual::VisualMapping;

/// Receives pings as they become due
pub trait PingSink {
    fn emit(&mut self, ping: Ping);
}

impl PingSink for Vec<Ping> {
    fn emit(&mut self, ping: Ping) {
        self.push(ping);
    }
}

/// The page controls mirroring the playback position
pub trait PlaybackView {
    fn show_date(&mut self, label: &str);
    fn set_slider_percent(&mut self, percent: f64);
}

/// Mutable replay position
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    current_time: f64,
    /// Paused by the caller
    paused: bool,
    /// Held while the scrubber is being dragged
    scrubbing: bool,
    ticker: ElapsedTicker,
    /// The record(s) at the timeline start have not been emitted this loop
    start_pending: bool,
}

impl PlaybackState {
    fn new(start: f64, now: f64) -> Self {
        Self {
            current_time: start,
            paused: false,
            scrubbing: false,
            ticker: ElapsedTicker::starting_at(now),
            start_pending: true,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// True while paused by the caller or held by a scrubber drag
    pub fn is_paused(&self) -> bool {
        self.paused || self.scrubbing
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.ticker.last()
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Paused,
    Advanced {
        /// Timeline distance covered
        data_delta: f64,
        emitted: usize,
        wrapped: bool,
    },
}

pub struct PlaybackDriver {
    timeline: Timeline,
    visuals: VisualMapping,
    real_to_data: LinearScale,
    percent_to_date: LinearScale,
    max_tick_delta_ms: f64,
    date_label: DateLabel,
    state: PlaybackState,
}

impl PlaybackDriver {
    /// Start at the beginning of the timeline, unpaused, with `now` as the
    /// last tick.
    pub fn new(
        timeline: Timeline,
        config: &PlaybackConfig,
        visuals: VisualMapping,
        now: f64,
    ) -> GaiaResult<Self> {
        let start = timeline.start() as f64;
        let end = timeline.end() as f64;

        Ok(Self {
            real_to_data: LinearScale::new([0.0, config.replay_duration_ms], [0.0, end - start]),
            percent_to_date: LinearScale::new([0.0, 100.0], [start, end]),
            max_tick_delta_ms: config.max_tick_delta_ms,
            date_label: DateLabel::new(config.date_format.clone())?,
            state: PlaybackState::new(start, now),
            timeline,
            visuals,
        })
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    /// Playback position as a slider percentage
    pub fn percent(&self) -> f64 {
        self.percent_to_date.invert(self.state.current_time)
    }

    pub fn date_label(&self) -> String {
        self.date_label.format(self.state.current_time)
    }

    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    pub fn resume(&mut self) {
        self.state.paused = false;
    }

    /// One animation frame at wall-clock `now`
    pub fn tick(
        &mut self,
        now: f64,
        sink: &mut impl PingSink,
        view: &mut impl PlaybackView,
    ) -> TickOutcome {
        if self.state.is_paused() {
            self.state.ticker.reset(now);
            return TickOutcome::Paused;
        }

        let elapsed = self.state.ticker.tick(now).unwrap_or(0.0);
        let real_delta = self.clamp_real_delta(elapsed);
        let data_delta = self.real_to_data.apply(real_delta);

        let outcome = self.advance(data_delta, sink);
        self.refresh_view(view);
        outcome
    }

    fn clamp_real_delta(&self, elapsed: f64) -> f64 {
        if elapsed > self.max_tick_delta_ms {
            log::warn!(
                "Tick came {elapsed:.0}ms after the previous one; advancing by {}ms",
                self.max_tick_delta_ms
            );
            self.max_tick_delta_ms
        } else {
            elapsed.max(0.0)
        }
    }

    /// Move the timeline forward by `data_delta`, emitting every record
    /// passed on the way. Does not touch the view or the wall clock.
    pub fn advance(&mut self, data_delta: f64, sink: &mut impl PingSink) -> TickOutcome {
        let from = self.state.current_time;
        let through = from + data_delta;

        let due: &[EventRecord] = if self.state.start_pending {
            self.timeline.window_inclusive(from, through)
        } else {
            self.timeline.window(from, through)
        };
        self.state.start_pending = false;

        for record in due {
            sink.emit(self.visuals.ping(record));
        }
        let emitted = due.len();

        self.state.current_time = through;
        let wrapped = self.state.current_time > self.timeline.end() as f64;
        if wrapped {
            self.state.current_time = self.timeline.start() as f64;
            self.state.start_pending = true;
            log::debug!("Reached end of timeline, looping");
        }

        if emitted > 0 {
            log::debug!("Emitted {emitted} pings for ({from}, {through}]");
        }

        TickOutcome::Advanced {
            data_delta,
            emitted,
            wrapped,
        }
    }

    /// Jump to a slider position. Emits nothing; only the date label follows.
    pub fn scrub(&mut self, percent: f64, view: &mut impl PlaybackView) {
        let percent = percent.clamp(0.0, 100.0);
        let time = self.percent_to_date.apply(percent);

        self.state.current_time = time;
        self.state.start_pending = time <= self.timeline.start() as f64;
        view.show_date(&self.date_label());
        log::info!("Scrubbed to {percent:.1}% ({})", self.date_label());
    }

    pub fn handle_scrubber(&mut self, event: ScrubberEvent, view: &mut impl PlaybackView) {
        match event {
            ScrubberEvent::DragStart => self.state.scrubbing = true,
            ScrubberEvent::DragEnd => self.state.scrubbing = false,
            ScrubberEvent::Change { percent } => self.scrub(percent, view),
        }
    }

    /// Bring the date label and slider in line with the current time
    pub fn refresh_view(&self, view: &mut impl PlaybackView) {
        view.show_date(&self.date_label());
        view.set_slider_percent(self.percent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingView {
        dates: Vec<String>,
        percents: Vec<f64>,
    }

    impl PlaybackView for RecordingView {
        fn show_date(&mut self, label: &str) {
            self.dates.push(label.to_string());
        }
        fn set_slider_percent(&mut self, percent: f64) {
            self.percents.push(percent);
        }
    }

    fn driver(times: &[i64], replay_duration_ms: f64) -> PlaybackDriver {
        let timeline = Timeline::new(
            times
                .iter()
                .map(|&t| EventRecord::new(t, t as f64 / 100.0, 0.0, 4.0))
                .collect(),
        )
        .unwrap();
        let config = PlaybackConfig {
            replay_duration_ms,
            ..PlaybackConfig::default()
        };
        PlaybackDriver::new(timeline, &config, VisualMapping::default(), 0.0).unwrap()
    }

    #[test]
    fn test_starts_at_timeline_start() {
        let driver = driver(&[200, 300], 1000.0);
        assert_eq!(driver.current_time(), 200.0);
        assert!(!driver.state().is_paused());
        assert_eq!(driver.state().last_tick(), Some(0.0));
        assert_eq!(driver.percent(), 0.0);
    }

    #[test]
    fn test_advance_emits_half_open_window() {
        let mut driver = driver(&[0, 1000, 5000], 1000.0);
        let mut pings = Vec::new();

        // First advance includes the record sitting at the start
        driver.advance(1500.0, &mut pings);
        assert_eq!(pings.len(), 2);

        // 1000 is not emitted again
        pings.clear();
        driver.advance(0.0, &mut pings);
        driver.advance(3500.0, &mut pings);
        assert_eq!(pings.len(), 1);
        assert_eq!(pings[0].lng, 50.0);
    }

    #[test]
    fn test_bad_date_format_is_rejected() {
        let timeline = Timeline::new(vec![EventRecord::new(0, 0.0, 0.0, 1.0)]).unwrap();
        let config = PlaybackConfig {
            date_format: "%Q".to_string(),
            ..PlaybackConfig::default()
        };
        assert!(PlaybackDriver::new(timeline, &config, VisualMapping::default(), 0.0).is_err());
    }

    #[test]
    fn test_negative_elapsed_does_not_rewind() {
        let mut driver = driver(&[0, 1000], 1000.0);
        let mut view = RecordingView::default();
        driver.tick(100.0, &mut Vec::new(), &mut view);
        let before = driver.current_time();

        driver.tick(50.0, &mut Vec::new(), &mut view);
        assert_eq!(driver.current_time(), before);
    }

    #[test]
    fn test_handle_scrubber_events() {
        let mut driver = driver(&[0, 1000], 1000.0);
        let mut view = RecordingView::default();

        driver.handle_scrubber(ScrubberEvent::DragStart, &mut view);
        assert!(driver.state().is_paused());
        driver.handle_scrubber(ScrubberEvent::Change { percent: 25.0 }, &mut view);
        assert_eq!(driver.current_time(), 250.0);
        driver.handle_scrubber(ScrubberEvent::DragEnd, &mut view);
        assert!(!driver.state().is_paused());
        assert!(!driver.state().is_scrubbing());

        // Out-of-range slider values stay on the timeline
        driver.scrub(140.0, &mut view);
        assert_eq!(driver.current_time(), 1000.0);
    }

    #[test]
    fn test_drag_end_does_not_lift_caller_pause() {
        let mut driver = driver(&[0, 1000], 1000.0);
        let mut view = RecordingView::default();

        driver.pause();
        driver.handle_scrubber(ScrubberEvent::DragEnd, &mut view);
        assert!(driver.state().is_paused());
        assert_eq!(
            driver.tick(100.0, &mut Vec::new(), &mut view),
            TickOutcome::Paused
        );

        // A drag on top of a caller pause leaves the pause in place
        driver.handle_scrubber(ScrubberEvent::DragStart, &mut view);
        driver.handle_scrubber(ScrubberEvent::DragEnd, &mut view);
        assert!(driver.state().is_paused());

        driver.resume();
        assert!(!driver.state().is_paused());
    }

    #[test]
    fn test_resume_waits_for_drag_to_finish() {
        let mut driver = driver(&[0, 1000], 1000.0);
        let mut view = RecordingView::default();

        driver.handle_scrubber(ScrubberEvent::DragStart, &mut view);
        driver.resume();
        assert!(driver.state().is_paused());
        assert_eq!(driver.current_time(), 0.0);

        driver.handle_scrubber(ScrubberEvent::DragEnd, &mut view);
        assert!(!driver.state().is_paused());
    }
}
