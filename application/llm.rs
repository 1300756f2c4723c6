//! The language-model seam.
//!
//! Drafting and research only depend on [`LanguageModel`]; [`GeminiClient`]
//! is the production implementation and tests substitute scripted fakes.
mod gemini;

use std::sync::Arc;

use serde_json::Value;

use crate::error::{AppError, AppResult};

pub use gemini::GeminiClient;

/// A tool the model may call. Every tool takes a single `query` string.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub query: String,
}

/// One entry of a conversation sent to the model.
#[derive(Clone, Debug, PartialEq)]
pub enum Turn {
    User(String),
    Assistant(String),
    ToolCall(ToolCall),
    ToolResult { name: String, result: Value },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationRequest {
    pub system: Option<String>,
    pub turns: Vec<Turn>,
    pub tools: Vec<ToolSpec>,
}

impl GenerationRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            turns: vec![Turn::User(prompt.into())],
            tools: vec![],
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Generation {
    Text(String),
    ToolCalls(Vec<ToolCall>),
}

#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> AppResult<Generation>;

    /// A single system + user exchange that must answer with text.
    async fn complete(&self, system: &str, prompt: &str) -> AppResult<String> {
        match self.generate(GenerationRequest::new(system, prompt)).await? {
            Generation::Text(text) => Ok(text),
            Generation::ToolCalls(calls) => Err(AppError::Llm(format!(
                "expected text but the model requested {} tool call(s)",
                calls.len()
            ))),
        }
    }
}

pub type DynLanguageModel = Arc<dyn LanguageModel>;
