//! Configuration system for Gaia
//! Holds every tunable of the replay, the visual mapping, the globe and its
//! external sources. All sections default to the values the page ships with.

use gaia_shared::Rgb;
use serde::{Deserialize, Serialize};

pub mod parser;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser};
pub use validation::ConfigValidator;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaiaConfig {
    pub playback: PlaybackConfig,
    pub visuals: VisualConfig,
    pub globe: GlobeConfig,
    pub sources: SourcesConfig,
    pub audio: AudioConfig,
}

/// Timing of the replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Wall-clock time one full pass over the timeline takes
    pub replay_duration_ms: f64,
    /// Upper bound on the wall-clock delta consumed by one tick
    pub max_tick_delta_ms: f64,
    /// chrono strftime pattern for the date label, rendered in UTC
    pub date_format: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            replay_duration_ms: 12.0 * 60.0 * 1000.0,
            max_tick_delta_ms: 500.0,
            date_format: "%b %d %Y %H:%M UTC".to_string(),
        }
    }
}

/// Power scale from magnitude to a numeric ping parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowScaleConfig {
    pub exponent: f64,
    pub domain: [f64; 2],
    pub range: [f64; 2],
    #[serde(default)]
    pub clamp: bool,
}

/// Power scale from magnitude to a ping color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScaleConfig {
    pub exponent: f64,
    pub domain: [f64; 2],
    pub range: [Rgb; 2],
    #[serde(default)]
    pub clamp: bool,
}

/// Magnitude-to-visual mapping for pings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub angle: PowScaleConfig,
    pub ttl: PowScaleConfig,
    pub color: ColorScaleConfig,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            angle: PowScaleConfig {
                exponent: 3.0,
                domain: [2.5, 10.0],
                range: [0.5, 15.0],
                clamp: false,
            },
            ttl: PowScaleConfig {
                exponent: 3.0,
                domain: [2.5, 10.0],
                range: [5000.0, 8000.0],
                clamp: false,
            },
            // Reversed domain: stronger events are redder
            color: ColorScaleConfig {
                exponent: 3.0,
                domain: [3.0, 2.0],
                range: [Rgb::new(255, 0, 0), Rgb::new(255, 255, 0)],
                clamp: false,
            },
        }
    }
}

/// Globe presentation and the page elements it is bound to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// `[lambda, phi, gamma]` projection rotation in degrees
    pub initial_rotation: [f64; 3],
    pub degrees_per_second: f64,
    /// Zoom limits for the projection scale
    pub scale_extent: [f64; 2],
    /// Added to the window size when sizing and centering the canvas
    pub extra_width: f64,
    pub extra_height: f64,
    pub ocean_fill: Rgb,
    pub land_fill: Rgb,
    pub border_stroke: Rgb,
    pub canvas_id: String,
    pub date_label_id: String,
    pub slider_id: String,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            initial_rotation: [100.0, -10.0, 0.0],
            degrees_per_second: 5.0,
            scale_extent: [50.0, 5000.0],
            extra_width: 0.0,
            extra_height: -120.0,
            ocean_fill: Rgb::new(0x01, 0x5c, 0x9c),
            land_fill: Rgb::new(0x5d, 0xab, 0xe1),
            border_stroke: Rgb::new(0xab, 0xee, 0xfb),
            canvas_id: "eventCanvas".to_string(),
            date_label_id: "date".to_string(),
            slider_id: "slider".to_string(),
        }
    }
}

/// Where the data comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub events_url: String,
    pub topology_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            events_url: "/json/events.json".to_string(),
            topology_url: "/json/continents.json".to_string(),
        }
    }
}

/// Background soundscape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_url: String,
    /// Note the sample is mapped to and replayed at
    pub tone: String,
    /// Tone.js time notation for the loop period
    pub loop_interval: String,
    /// Give up waiting for the sample after this long
    pub load_timeout_ms: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_url: "audio/sample1.mp3".to_string(),
            tone: "C3".to_string(),
            loop_interval: "1n".to_string(),
            load_timeout_ms: 30_000,
        }
    }
}
