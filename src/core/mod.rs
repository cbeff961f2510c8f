pub mod client;
pub mod endpoints;
pub mod fetcher;

pub use crate::domain::model::{FightQuery, RankingQuery};
pub use crate::domain::ports::{EndpointConfig, FightRenderer, JsonSource};
pub use crate::utils::error::{FetchError, FetchResult, Result};
