//! UTC date label for the current playback position

use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use gaia_shared::{GaiaError, GaiaResult};
use std::fmt::Write;

const INVALID_DATE: &str = "Invalid date";

#[derive(Debug, Clone, PartialEq)]
pub struct DateLabel {
    pattern: String,
}

impl DateLabel {
    /// `pattern` is a chrono strftime format string
    pub fn new(pattern: impl Into<String>) -> GaiaResult<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(GaiaError::InvalidConfig {
                message: format!("Invalid date format: {pattern:?}"),
                field: Some("playback.date_format".to_string()),
            });
        }
        Ok(Self { pattern })
    }

    /// Format a millisecond timestamp in UTC
    pub fn format(&self, millis: f64) -> String {
        if !millis.is_finite() {
            return INVALID_DATE.to_string();
        }

        let Some(datetime) = DateTime::from_timestamp_millis(millis.floor() as i64) else {
            return INVALID_DATE.to_string();
        };

        let mut label = String::new();
        match write!(label, "{}", datetime.format(&self.pattern)) {
            Ok(()) => label,
            Err(_) => INVALID_DATE.to_string(),
        }
    }
}
