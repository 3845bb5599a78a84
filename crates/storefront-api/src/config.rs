use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::error::{Result, StoreApiError};

const ACCESS_KEY_HEADER: &str = "sw-access-key";
const LANGUAGE_HEADER: &str = "sw-language-id";
const CONTEXT_TOKEN_HEADER: &str = "sw-context-token";

/// Connection settings shared by every store API request
///
/// Passed into the client explicitly so tests can point it at a local server.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Store API root, e.g. `https://shop.example.com/store-api`
    pub base_url: String,
    /// Sales channel access key
    pub access_key: String,
    pub language_id: Option<String>,
    pub context_token: Option<String>,
    /// Anything else the backend wants on every request
    pub extra_headers: Vec<(String, String)>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_key: access_key.into(),
            ..Self::default()
        }
    }

    pub fn language_id(mut self, language_id: impl Into<String>) -> Self {
        self.language_id = Some(language_id.into());
        self
    }

    pub fn context_token(mut self, token: impl Into<String>) -> Self {
        self.context_token = Some(token.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Full URL for a path below the API root
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Header set sent with every request
    pub fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        insert_header(&mut headers, ACCESS_KEY_HEADER, &self.access_key)?;
        if let Some(ref language_id) = self.language_id {
            insert_header(&mut headers, LANGUAGE_HEADER, language_id)?;
        }
        if let Some(ref token) = self.context_token {
            insert_header(&mut headers, CONTEXT_TOKEN_HEADER, token)?;
        }
        for (name, value) in &self.extra_headers {
            insert_header(&mut headers, name, value)?;
        }

        Ok(headers)
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| StoreApiError::InvalidConfig(format!("header name {:?}: {}", name, e)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| StoreApiError::InvalidConfig(format!("value for {}: {}", name, e)))?;
    headers.insert(header_name, header_value);
    Ok(())
}
