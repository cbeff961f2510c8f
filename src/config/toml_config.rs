use crate::config::Settings;
use crate::utils::error::{LorrgsError, Result};
use crate::utils::logger::LogFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional configuration file. Every section and key may be omitted.
///
/// ```toml
/// [endpoints]
/// api_base = "http://127.0.0.1:5000"
/// static_base = "${LORRGS_STATIC_HOST}"
///
/// [defaults]
/// spec_slug = "redmage-redmage"
///
/// [logging]
/// format = "json"
/// verbose = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub endpoints: Option<EndpointsSection>,
    pub defaults: Option<DefaultsSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsSection {
    pub api_base: Option<String>,
    pub static_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsSection {
    pub spec_slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
    })
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Overlays the keys present in the file onto `settings`.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(endpoints) = &self.endpoints {
            if let Some(api_base) = &endpoints.api_base {
                settings.api_base = api_base.clone();
            }
            if let Some(static_base) = &endpoints.static_base {
                settings.static_base = static_base.clone();
            }
        }

        if let Some(spec_slug) = self.defaults.as_ref().and_then(|d| d.spec_slug.as_ref()) {
            settings.default_spec = spec_slug.clone();
        }

        if let Some(logging) = &self.logging {
            if let Some(format) = logging.format {
                settings.log_format = format;
            }
            if let Some(verbose) = logging.verbose {
                settings.verbose = verbose;
            }
        }
    }

    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::default();
        self.apply_to(&mut settings);
        settings
    }
}

impl std::str::FromStr for TomlConfig {
    type Err = LorrgsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml_str(s)
    }
}
