use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use postwright::error::{AppError, AppResult};
use postwright::llm::{Generation, GenerationRequest, LanguageModel, ToolCall};
use postwright::search::{SearchProvider, SearchResult};

/// Answers each `generate` call with the next scripted reply.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Generation>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Generation>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, request: GenerationRequest) -> AppResult<Generation> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::Llm("no scripted reply left".to_string()))
    }
}

#[derive(Debug, Default)]
pub struct StaticSearch {
    results: Vec<SearchResult>,
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            queries: Mutex::new(vec![]),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.results.clone())
    }
}

pub fn search_call(query: &str) -> Generation {
    Generation::ToolCalls(vec![ToolCall {
        name: postwright::agent::SEARCH_TOOL_NAME.to_string(),
        query: query.to_string(),
    }])
}

pub fn text(text: &str) -> Generation {
    Generation::Text(text.to_string())
}

pub fn result(title: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        link: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
        snippet: format!("{title} snippet"),
        source: "google".to_string(),
    }
}
