//! Common error types used across all Gaia crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all Gaia operations
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GaiaError {
    // Data-related errors
    #[error("Data fetch failed: {message}")]
    DataFetch { message: String },

    #[error("Data parse error: {message}")]
    DataParse {
        message: String,
        line: Option<usize>,
    },

    #[error("Event feed is empty")]
    EmptyTimeline,

    #[error("Event feed is not sorted by time: record {index} at {time} precedes {previous}")]
    UnsortedRecords { index: usize, time: i64, previous: i64 },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    // Browser collaborators
    #[error("Element not found: #{id}")]
    MissingElement { id: String },

    #[error("Audio load failed: {message}")]
    AudioLoad { message: String },

    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Result type alias for Gaia operations
pub type GaiaResult<T> = Result<T, GaiaError>;

/// Error response structure for JavaScript interop
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: GaiaError,
    pub timestamp: u64,
    pub context: Option<ErrorContext>,
}

/// Additional context for error reporting
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
}

impl ErrorResponse {
    pub fn new(error: GaiaError) -> Self {
        Self {
            success: false,
            error,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
            context: None,
        }
    }

    pub fn with_context(mut self, component: &str, operation: &str) -> Self {
        self.context = Some(ErrorContext {
            component: component.to_string(),
            operation: operation.to_string(),
        });
        self
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"type":"Internal","details":{"message":"Failed to serialize error"}}}"#.to_string()
        })
    }
}

impl From<serde_json::Error> for GaiaError {
    fn from(err: serde_json::Error) -> Self {
        GaiaError::DataParse {
            message: err.to_string(),
            line: Some(err.line()),
        }
    }
}

impl From<wasm_bindgen::JsValue> for GaiaError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        GaiaError::JsInterop {
            message: err
                .as_string()
                .unwrap_or_else(|| format!("{err:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = GaiaError::DataFetch {
            message: "HTTP 404 (URL: /json/events.json)".to_string(),
        };

        let response = ErrorResponse::new(error).with_context("Loader", "fetch_events");

        let json = response.to_json();
        assert!(json.contains("DataFetch"));
        assert!(json.contains("HTTP 404"));
        assert!(json.contains("fetch_events"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<Vec<u32>>("[1, 2,").unwrap_err();
        let gaia_err: GaiaError = err.into();

        match gaia_err {
            GaiaError::DataParse { line, .. } => assert_eq!(line, Some(1)),
            other => panic!("Wrong error variant: {other:?}"),
        }
    }
}
