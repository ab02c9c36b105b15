//! Wall-clock sources and the elapsed-since-last-tick helper

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Milliseconds since the Unix epoch, in both WASM and native builds
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64() * 1000.0)
                .unwrap_or(0.0)
        }
    }
}

/// Remembers when the previous tick happened.
///
/// A fresh ticker has no previous tick, so its first [`tick`](Self::tick)
/// reports nothing and only records the time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElapsedTicker {
    last: Option<f64>,
}

impl ElapsedTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: f64) -> Self {
        Self { last: Some(now) }
    }

    /// Milliseconds since the previous tick, then mark `now` as the last tick
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        let elapsed = self.last.map(|last| now - last);
        self.last = Some(now);
        elapsed
    }

    /// Mark `now` as the last tick without reporting elapsed time
    pub fn reset(&mut self, now: f64) {
        self.last = Some(now);
    }

    pub fn last(&self) -> Option<f64> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_only_records() {
        let mut ticker = ElapsedTicker::new();
        assert_eq!(ticker.tick(100.0), None);
        assert_eq!(ticker.tick(116.0), Some(16.0));
        assert_eq!(ticker.tick(150.0), Some(34.0));
    }

    #[test]
    fn test_reset_skips_elapsed_time() {
        let mut ticker = ElapsedTicker::starting_at(0.0);
        ticker.reset(1000.0);
        assert_eq!(ticker.last(), Some(1000.0));
        assert_eq!(ticker.tick(1010.0), Some(10.0));
    }

    #[test]
    fn test_wall_clock_advances() {
        let clock = WallClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a > 0.0);
        assert!(b >= a);
    }
}
