//! HTTP catalog provider
//!
//! Fetches `GET {base}/videos`, optionally authenticated with a bearer token.
//! The body is either a JSON array of items or an object wrapping them under
//! `items`.

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::Video,
    services::providers::CatalogProvider,
};

#[derive(Clone)]
pub struct HttpCatalogProvider {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalogProvider {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Builds a provider from configuration, applying the configured timeout
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.external_timeout())
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: Some(config.flic_token.clone()).filter(|t| !t.is_empty()),
        })
    }
}

#[async_trait::async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn fetch_videos(&self) -> AppResult<Vec<Video>> {
        if self.base_url.trim().is_empty() {
            tracing::debug!("No external catalog configured");
            return Ok(Vec::new());
        }

        let url = format!("{}/videos", self.base_url);
        let mut request = self.http_client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        let payload: Value = response.json().await?;
        let videos = parse_catalog(&payload);

        tracing::info!(
            url = %url,
            results = videos.len(),
            provider = self.name(),
            "External catalog fetched"
        );

        Ok(videos)
    }

    fn name(&self) -> &'static str {
        "http_catalog"
    }
}

/// Maps a catalog payload to videos, skipping items without an id
pub fn parse_catalog(payload: &Value) -> Vec<Video> {
    let items = match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    items.iter().filter_map(parse_item).collect()
}

fn parse_item(item: &Value) -> Option<Video> {
    let id = ["id", "_id", "uuid"]
        .iter()
        .find_map(|key| item.get(*key).and_then(scalar_to_string))?;

    let tags = item
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().filter_map(scalar_to_string).collect())
        .unwrap_or_default();

    Some(Video {
        id,
        title: item.get("title").and_then(scalar_to_string).unwrap_or_default(),
        description: item.get("description").and_then(scalar_to_string),
        tags,
        mood: item.get("mood").and_then(scalar_to_string),
    })
}

// Strings pass through, numbers and booleans are stringified. Null, empty
// strings and containers yield nothing.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
