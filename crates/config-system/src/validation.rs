//! Configuration validation utilities

use chrono::format::{Item, StrftimeItems};

use crate::{ColorScaleConfig, GaiaConfig, GlobeConfig, PlaybackConfig, PowScaleConfig};
use gaia_shared::{GaiaError, GaiaResult};

/// Configuration validator with range checks per section
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &GaiaConfig) -> GaiaResult<()> {
        Self::validate_playback(&config.playback)?;

        Self::validate_pow_scale("visuals.angle", &config.visuals.angle)?;
        Self::validate_pow_scale("visuals.ttl", &config.visuals.ttl)?;
        Self::validate_color_scale("visuals.color", &config.visuals.color)?;

        Self::validate_globe(&config.globe)?;

        if config.audio.load_timeout_ms == 0 {
            return Err(invalid(
                "audio.load_timeout_ms",
                "Audio load timeout must be greater than 0".to_string(),
            ));
        }

        if config.sources.events_url.trim().is_empty() {
            return Err(GaiaError::MissingConfig {
                field: "sources.events_url".to_string(),
            });
        }

        Ok(())
    }

    fn validate_playback(playback: &PlaybackConfig) -> GaiaResult<()> {
        if !(playback.replay_duration_ms > 0.0 && playback.replay_duration_ms.is_finite()) {
            return Err(invalid(
                "playback.replay_duration_ms",
                format!(
                    "Invalid replay duration: {}. Must be a positive number of milliseconds",
                    playback.replay_duration_ms
                ),
            ));
        }

        if !(playback.max_tick_delta_ms > 0.0 && playback.max_tick_delta_ms.is_finite()) {
            return Err(invalid(
                "playback.max_tick_delta_ms",
                format!(
                    "Invalid max tick delta: {}. Must be a positive number of milliseconds",
                    playback.max_tick_delta_ms
                ),
            ));
        }

        if playback.date_format.is_empty() {
            return Err(invalid(
                "playback.date_format",
                "Date format cannot be empty".to_string(),
            ));
        }

        if StrftimeItems::new(&playback.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid(
                "playback.date_format",
                format!("Invalid date format: {:?}", playback.date_format),
            ));
        }

        Ok(())
    }

    fn validate_pow_scale(field: &str, scale: &PowScaleConfig) -> GaiaResult<()> {
        Self::validate_exponent_and_domain(field, scale.exponent, scale.domain)?;

        if scale.range.iter().any(|v| !v.is_finite()) {
            return Err(invalid(
                field,
                format!("Range must be finite, got {:?}", scale.range),
            ));
        }

        Ok(())
    }

    fn validate_color_scale(field: &str, scale: &ColorScaleConfig) -> GaiaResult<()> {
        Self::validate_exponent_and_domain(field, scale.exponent, scale.domain)
    }

    fn validate_exponent_and_domain(field: &str, exponent: f64, domain: [f64; 2]) -> GaiaResult<()> {
        if !(exponent > 0.0 && exponent.is_finite()) {
            return Err(invalid(
                field,
                format!("Invalid exponent: {exponent}. Must be positive"),
            ));
        }

        if domain.iter().any(|v| !v.is_finite()) {
            return Err(invalid(field, format!("Domain must be finite, got {domain:?}")));
        }

        // Equal powered endpoints would make the scale divide by zero
        let powered = |x: f64| x.signum() * x.abs().powf(exponent);
        if powered(domain[0]) == powered(domain[1]) {
            return Err(invalid(
                field,
                format!("Domain endpoints must differ, got {domain:?}"),
            ));
        }

        Ok(())
    }

    fn validate_globe(globe: &GlobeConfig) -> GaiaResult<()> {
        if !globe.degrees_per_second.is_finite() {
            return Err(invalid(
                "globe.degrees_per_second",
                "Rotation speed must be finite".to_string(),
            ));
        }

        let [min_scale, max_scale] = globe.scale_extent;
        if !(min_scale > 0.0 && min_scale <= max_scale) {
            return Err(invalid(
                "globe.scale_extent",
                format!("Invalid scale extent: {:?}", globe.scale_extent),
            ));
        }

        for (field, id) in [
            ("globe.canvas_id", &globe.canvas_id),
            ("globe.date_label_id", &globe.date_label_id),
            ("globe.slider_id", &globe.slider_id),
        ] {
            if id.trim().is_empty() {
                return Err(GaiaError::MissingConfig {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: String) -> GaiaError {
    GaiaError::InvalidConfig {
        message,
        field: Some(field.to_string()),
    }
}
