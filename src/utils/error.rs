use thiserror::Error;

/// Why a single GET did not produce a JSON value.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {status}{}", detail(.message))]
    HttpStatus {
        status: u16,
        /// `error` field of the response body, when the backend sent one.
        message: Option<String>,
    },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({})", m))
        .unwrap_or_default()
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err)
    }
}

/// Outcome of one fetch: the parsed body, untouched, or the reason it failed.
pub type FetchResult = std::result::Result<serde_json::Value, FetchError>;

#[derive(Error, Debug)]
pub enum LorrgsError {
    #[error("Fetch failed: {0}")]
    RequestError(#[from] FetchError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LorrgsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LorrgsError::RequestError(FetchError::Decode(_)) => ErrorCategory::Data,
            LorrgsError::RequestError(_) => ErrorCategory::Network,
            LorrgsError::IoError(_) => ErrorCategory::System,
            LorrgsError::TomlError(_) | LorrgsError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a ranking file that was never generated is expected
            LorrgsError::RequestError(e) if e.is_not_found() => ErrorSeverity::Low,
            LorrgsError::RequestError(_) => ErrorSeverity::Medium,
            LorrgsError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LorrgsError::RequestError(FetchError::Network(_)) => {
                "Check that the backend is running and the base URL is reachable"
            }
            LorrgsError::RequestError(FetchError::HttpStatus { status: 404, .. }) => {
                "Confirm the ranking update job has run and the IDs are correct"
            }
            LorrgsError::RequestError(FetchError::HttpStatus { .. }) => {
                "Check the backend logs for this request"
            }
            LorrgsError::RequestError(FetchError::Decode(_)) => {
                "The server answered with something that is not JSON; check the URL"
            }
            LorrgsError::IoError(_) => "Check file permissions and that the path exists",
            LorrgsError::TomlError(_) => "Fix the syntax of the configuration file",
            LorrgsError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LorrgsError::RequestError(FetchError::HttpStatus { status: 404, .. }) => {
                "The requested data does not exist (yet)".to_string()
            }
            LorrgsError::RequestError(FetchError::Network(_)) => {
                "Could not reach the server".to_string()
            }
            LorrgsError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LorrgsError>;
