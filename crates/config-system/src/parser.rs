//! Configuration parser for multiple formats

use crate::{ConfigValidator, GaiaConfig};
use gaia_shared::{GaiaError, GaiaResult};

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_extension(ext: &str) -> GaiaResult<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(parse_error(format!("Unsupported config format: {ext}"))),
        }
    }
}

/// Configuration parser
pub struct ConfigParser;

impl ConfigParser {
    /// Parse and validate configuration from a string
    pub fn parse_string(content: &str, format: ConfigFormat) -> GaiaResult<GaiaConfig> {
        let config: GaiaConfig = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| parse_error(format!("YAML parse error: {e}")))?,
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| parse_error(format!("JSON parse error: {e}")))?,
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| parse_error(format!("TOML parse error: {e}")))?,
        };

        ConfigValidator::validate(&config)?;
        log::info!("Loaded {format:?} configuration");
        Ok(config)
    }

    /// Parse a JSON document, falling back to defaults when absent or blank
    pub fn parse_optional_json(content: Option<&str>) -> GaiaResult<GaiaConfig> {
        match content.map(str::trim) {
            Some(json) if !json.is_empty() => Self::parse_string(json, ConfigFormat::Json),
            _ => Ok(GaiaConfig::default()),
        }
    }

    /// Parse configuration from a file, detecting the format from its extension
    #[cfg(not(target_arch = "wasm32"))]
    pub fn parse_file(path: impl AsRef<std::path::Path>) -> GaiaResult<GaiaConfig> {
        let path = path.as_ref();

        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            parse_error("Cannot determine config format from file extension".to_string())
        })?;
        let format = ConfigFormat::from_extension(ext)?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| parse_error(format!("Cannot read {}: {e}", path.display())))?;

        Self::parse_string(&content, format)
    }

    /// Serialize configuration
    pub fn to_string(config: &GaiaConfig, format: ConfigFormat) -> GaiaResult<String> {
        match format {
            ConfigFormat::Yaml => serde_yaml::to_string(config)
                .map_err(|e| parse_error(format!("YAML serialize error: {e}"))),
            ConfigFormat::Json => serde_json::to_string_pretty(config)
                .map_err(|e| parse_error(format!("JSON serialize error: {e}"))),
            ConfigFormat::Toml => toml::to_string_pretty(config)
                .map_err(|e| parse_error(format!("TOML serialize error: {e}"))),
        }
    }
}

fn parse_error(message: String) -> GaiaError {
    GaiaError::InvalidConfig {
        message,
        field: None,
    }
}
