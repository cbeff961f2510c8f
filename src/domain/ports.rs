use crate::utils::error::FetchResult;
use async_trait::async_trait;
use serde_json::Value;

/// Anything that can turn a URL into a JSON value.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Receives a loaded fight payload together with the spec it was filtered by.
pub trait FightRenderer {
    fn render(&self, data: &Value, spec_slug: &str);
}

impl<F> FightRenderer for F
where
    F: Fn(&Value, &str),
{
    fn render(&self, data: &Value, spec_slug: &str) {
        self(data, spec_slug)
    }
}

pub trait EndpointConfig: Send + Sync {
    /// Backend serving `/api/...`.
    fn api_base(&self) -> &str;
    /// Host serving the generated `data/*.json` files.
    fn static_base(&self) -> &str;
}
