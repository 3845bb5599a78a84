use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{Result, StoreApiError};

/// Thin client for the store API
///
/// One request per call. No retries, no caching, no deadline beyond whatever
/// reqwest does by default.
#[derive(Debug, Clone)]
pub struct StoreApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl StoreApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(config.default_headers()?)
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// POST a JSON body and hand back the raw response text
    ///
    /// Anything outside 2xx becomes [`StoreApiError::HttpStatus`]; the body is
    /// not inspected in that case.
    pub(crate) async fn post_json(
        &self,
        path: &str,
        body: &Value,
        headers: HeaderMap,
    ) -> Result<String> {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreApiError::HttpStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
