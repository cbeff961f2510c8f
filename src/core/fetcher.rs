use crate::domain::ports::JsonSource;
use crate::utils::error::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Plain GET + status check + JSON parse. No retries, no caching.
#[derive(Debug, Clone, Default)]
pub struct DataFetcher {
    client: Client,
}

impl DataFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Shares an existing connection pool.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// The backend reports failures as `{"error": "..."}`.
fn backend_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl JsonSource for DataFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        tracing::debug!("Making request to: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: backend_message(&body),
            });
        }

        // the whole body has to parse; nothing partial is handed out
        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }
}
