mod google;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

pub use google::GoogleSearch;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEngine {
    Google,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub provider: SearchEngine,
    pub api_key: String,
    pub search_engine_id: Option<String>,
    pub max_results: usize,
    pub safe_search: bool,
}

impl SearchConfig {
    pub fn google(api_key: String, search_engine_id: Option<String>) -> Self {
        Self {
            provider: SearchEngine::Google,
            api_key,
            search_engine_id,
            max_results: 5,
            safe_search: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub source: String,
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>>;
}

pub type DynSearchProvider = Arc<dyn SearchProvider>;
