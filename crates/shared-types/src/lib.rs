//! Shared types for the Gaia globe
//!
//! This crate contains the types passed between the data-manager,
//! playback and wasm-bridge crates: event records, the pings derived from
//! them, UI input events and the common error type.

use serde::{Deserialize, Serialize};

pub mod color;
pub mod errors;
pub mod events;

pub use color::Rgb;
pub use errors::{ErrorResponse, GaiaError, GaiaResult};

/// One geolocated event from the data feed.
///
/// `time` is a millisecond timestamp. Records are immutable once loaded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    pub time: i64,
    pub lng: f64,
    pub lat: f64,
    pub mag: f64,
}

impl EventRecord {
    pub fn new(time: i64, lng: f64, lat: f64, mag: f64) -> Self {
        Self {
            time,
            lng,
            lat,
            mag,
        }
    }
}

/// Span of the data timeline, both ends inclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> i64 {
        (self.end - self.start).max(0)
    }
}

/// Visual parameters of a ping marker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PingStyle {
    /// Maximum radius of the ring, in degrees of arc
    pub angle: f64,
    pub color: Rgb,
    /// Lifetime of the animation in milliseconds
    pub ttl: f64,
}

/// An animated marker placed on the globe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Ping {
    pub lng: f64,
    pub lat: f64,
    pub style: PingStyle,
}
