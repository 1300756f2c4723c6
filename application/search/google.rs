use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::search::{SearchConfig, SearchProvider, SearchResult};

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Google Programmable Search (Custom Search JSON API).
#[derive(Clone, Debug)]
pub struct GoogleSearch {
    http: Client,
    base_url: Url,
    config: SearchConfig,
}

impl GoogleSearch {
    pub fn new(http: Client, base_url: Url, config: SearchConfig) -> Self {
        Self {
            http,
            base_url,
            config,
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for GoogleSearch {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let search_engine_id = self.config.search_engine_id.as_deref().ok_or_else(|| {
            AppError::Search("search engine ID is required for Google Custom Search".to_string())
        })?;

        let url = self
            .base_url
            .join("customsearch/v1")
            .map_err(|err| AppError::Search(format!("invalid search endpoint: {err}")))?;
        let num = self.config.max_results.to_string();
        let safe = if self.config.safe_search { "active" } else { "off" };

        let response = self
            .http
            .get(url)
            .query(&[
                ("q", query),
                ("key", self.config.api_key.as_str()),
                ("cx", search_engine_id),
                ("num", num.as_str()),
                ("safe", safe),
            ])
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await
            .map_err(|err| AppError::Search(format!("search request failed: {err}")))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|err| AppError::Search(format!("invalid response format: {err}")))?;
        if let Some(error) = body.error {
            return Err(AppError::Search(format!("Google API error: {}", error.message)));
        }

        let results: Vec<SearchResult> = body
            .items
            .into_iter()
            .take(self.config.max_results)
            .map(|item| SearchResult {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
                source: "google".to_string(),
            })
            .collect();
        info!(results = results.len(), "web search completed");

        Ok(results)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
    error: Option<SearchApiError>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct SearchApiError {
    message: String,
}
