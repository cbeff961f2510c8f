#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::DEFAULT_SPEC_SLUG;
use crate::domain::ports::EndpointConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_slug, validate_url, Validate};
use serde::{Deserialize, Serialize};

/// Local backend the front end talks to by default. Ranking files are served
/// from the same origin.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Fully resolved settings: defaults, then the TOML file, then command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_base: String,
    pub static_base: String,
    pub default_spec: String,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_BASE_URL.to_string(),
            static_base: DEFAULT_BASE_URL.to_string(),
            default_spec: DEFAULT_SPEC_SLUG.to_string(),
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl EndpointConfig for Settings {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn static_base(&self) -> &str {
        &self.static_base
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_url("static_base", &self.static_base)?;
        validate_slug("default_spec", &self.default_spec)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.api_base(), "http://127.0.0.1:5000");
        assert_eq!(settings.static_base(), "http://127.0.0.1:5000");
        assert_eq!(settings.default_spec, "redmage-redmage");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_base() {
        let settings = Settings {
            static_base: "file:///srv/front_end".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
