//! Magnitude to ping appearance

use gaia_config::VisualConfig;
use gaia_shared::{EventRecord, Ping, PingStyle};

use crate::scale::{ColorScale, PowScale};

/// The three magnitude scales that parameterize a ping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualMapping {
    angle: PowScale,
    color: ColorScale,
    ttl: PowScale,
}

impl VisualMapping {
    pub fn new(angle: PowScale, color: ColorScale, ttl: PowScale) -> Self {
        Self { angle, color, ttl }
    }

    pub fn from_config(config: &VisualConfig) -> Self {
        let angle = PowScale::new(config.angle.exponent, config.angle.domain, config.angle.range)
            .clamped(config.angle.clamp);
        let ttl = PowScale::new(config.ttl.exponent, config.ttl.domain, config.ttl.range)
            .clamped(config.ttl.clamp);
        let color = ColorScale::new(config.color.exponent, config.color.domain, config.color.range)
            .clamped(config.color.clamp);

        Self::new(angle, color, ttl)
    }

    pub fn style(&self, mag: f64) -> PingStyle {
        PingStyle {
            angle: self.angle.apply(mag),
            color: self.color.apply(mag),
            ttl: self.ttl.apply(mag),
        }
    }

    pub fn ping(&self, record: &EventRecord) -> Ping {
        Ping {
            lng: record.lng,
            lat: record.lat,
            style: self.style(record.mag),
        }
    }
}

impl Default for VisualMapping {
    fn default() -> Self {
        Self::from_config(&VisualConfig::default())
    }
}
