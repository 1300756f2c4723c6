use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::llm::{DynLanguageModel, Generation, GenerationRequest, ToolCall, ToolSpec, Turn};
use crate::search::DynSearchProvider;

pub const SEARCH_TOOL_NAME: &str = "web_search";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant with access to a search tool.
IMPORTANT: Do NOT say you don't have information or need to search first.
Instead, IMMEDIATELY use the search tool whenever you need to find information about:
- People
- Current events
- Facts you're not completely certain about
- Any topic that might need up-to-date information

Just use the tool directly without announcing that you're going to search.
After getting search results, provide a clear and concise summary of the information.";

const DEFAULT_MAX_STEPS: usize = 5;

/// Answers a question with the help of a web search tool the model can call.
#[derive(Clone)]
pub struct WebAgent {
    llm: DynLanguageModel,
    search: DynSearchProvider,
    system_prompt: String,
    max_steps: usize,
}

impl WebAgent {
    pub fn new(llm: DynLanguageModel, search: DynSearchProvider) -> Self {
        Self {
            llm,
            search,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn llm(&self) -> &DynLanguageModel {
        &self.llm
    }

    pub async fn invoke(&self, user_message: &str) -> AppResult<String> {
        let mut request = GenerationRequest::new(self.system_prompt.clone(), user_message)
            .with_tools(vec![search_tool()]);

        for step in 0..self.max_steps {
            let calls = match self.llm.generate(request.clone()).await? {
                Generation::Text(text) => {
                    info!(steps = step + 1, "research finished");
                    return Ok(text);
                }
                Generation::ToolCalls(calls) => calls,
            };

            let mut results = Vec::with_capacity(calls.len());
            for call in &calls {
                results.push(Turn::ToolResult {
                    name: call.name.clone(),
                    result: self.run_tool(call).await,
                });
            }
            request.turns.extend(calls.into_iter().map(Turn::ToolCall));
            request.turns.extend(results);
        }

        Err(AppError::Llm(format!(
            "research did not finish within {} steps",
            self.max_steps
        )))
    }

    async fn run_tool(&self, call: &ToolCall) -> Value {
        if call.name != SEARCH_TOOL_NAME {
            warn!(tool = %call.name, "model requested an unknown tool");
            return json!({ "error": format!("unknown tool {}", call.name) });
        }

        info!(query = %call.query, "running web search");
        match self.search.search(&call.query).await {
            Ok(results) => serde_json::to_value(results).unwrap_or_else(|_| json!([])),
            Err(err) => {
                let error_message = err.to_string();
                warn!(error_message, "search error");
                json!([])
            }
        }
    }
}

fn search_tool() -> ToolSpec {
    ToolSpec {
        name: SEARCH_TOOL_NAME.to_string(),
        description: "Search the web for recent results.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::llm::LanguageModel;
    use crate::search::{SearchProvider, SearchResult};

    #[derive(Default)]
    struct Scripted {
        replies: Mutex<VecDeque<Generation>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl Scripted {
        fn new(replies: Vec<Generation>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(vec![]),
            })
        }

        fn tool_results(&self, index: usize) -> Vec<Value> {
            self.requests.lock().unwrap()[index]
                .turns
                .iter()
                .filter_map(|turn| match turn {
                    Turn::ToolResult { result, .. } => Some(result.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl LanguageModel for Scripted {
        async fn generate(&self, request: GenerationRequest) -> AppResult<Generation> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AppError::Llm("script exhausted".to_string()))
        }
    }

    struct FailingSearch;

    #[async_trait::async_trait]
    impl SearchProvider for FailingSearch {
        async fn search(&self, _query: &str) -> AppResult<Vec<SearchResult>> {
            Err(AppError::Search("Google API error: quota".to_string()))
        }
    }

    fn call(name: &str, query: &str) -> Generation {
        Generation::ToolCalls(vec![ToolCall {
            name: name.to_string(),
            query: query.to_string(),
        }])
    }

    #[tokio::test]
    async fn test_step_budget_is_enforced() {
        let llm = Scripted::new(vec![call(SEARCH_TOOL_NAME, "rust"), call(SEARCH_TOOL_NAME, "rust")]);
        let agent = WebAgent::new(llm.clone(), Arc::new(FailingSearch)).with_max_steps(1);

        let err = agent.invoke("what is new?").await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Llm(message) if message == "research did not finish within 1 steps"
        ));
        assert_eq!(llm.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_search_continues_with_empty_results() {
        let llm = Scripted::new(vec![
            call(SEARCH_TOOL_NAME, "rust"),
            Generation::Text("summary".to_string()),
        ]);
        let agent = WebAgent::new(llm.clone(), Arc::new(FailingSearch));

        let answer = agent.invoke("what is new?").await.unwrap();

        assert_eq!(answer, "summary");
        assert_eq!(llm.tool_results(1), vec![json!([])]);
    }

    #[tokio::test]
    async fn test_unknown_tool_gets_error_result() {
        let llm = Scripted::new(vec![
            call("calculator", "2+2"),
            Generation::Text("done".to_string()),
        ]);
        let agent = WebAgent::new(llm.clone(), Arc::new(FailingSearch))
            .with_system_prompt("answer tersely");

        agent.invoke("sum").await.unwrap();

        assert_eq!(
            llm.tool_results(1),
            vec![json!({ "error": "unknown tool calculator" })]
        );
        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests[0].system.as_deref(), Some("answer tersely"));
        assert_eq!(requests[0].tools[0].name, SEARCH_TOOL_NAME);
    }
}
