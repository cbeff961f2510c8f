pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};
pub use crate::config::{toml_config::TomlConfig, Settings};

pub use crate::core::{client::LorrgsClient, endpoints::Endpoints, fetcher::DataFetcher};
pub use crate::domain::model::{FightQuery, RankingQuery, DEFAULT_SPEC_SLUG};
pub use crate::domain::ports::{EndpointConfig, FightRenderer, JsonSource};
pub use crate::utils::error::{FetchError, FetchResult, LorrgsError, Result};
