use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};
use url::Url;

use crate::error::{AppError, AppResult};
use crate::llm::{Generation, GenerationRequest, LanguageModel, ToolCall, ToolSpec, Turn};

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: Client,
    base_url: Url,
    api_key: String,
    model: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(
        http: Client,
        base_url: Url,
        api_key: String,
        model: String,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            model,
            max_output_tokens,
        }
    }

    fn endpoint(&self) -> AppResult<Url> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|err| AppError::Llm(format!("invalid Gemini endpoint: {err}")))
    }

    fn build_body(&self, request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: request.system.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part::text(text)],
            }),
            contents: build_contents(&request.turns),
            tools: build_tools(&request.tools),
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

#[async_trait::async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> AppResult<Generation> {
        let body = self.build_body(&request);
        debug!(
            model = %self.model,
            turns = request.turns.len(),
            tools = request.tools.len(),
            "calling gemini"
        );

        let response = self
            .http
            .post(self.endpoint()?)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error_message = serde_json::from_str::<GenerateContentResponse>(&body)
                .ok()
                .and_then(|payload| payload.error)
                .map(|api_error| api_error.message)
                .unwrap_or_else(|| format!("unexpected status {status}: {}", body.trim()));
            error!(status = status.as_u16(), %error_message, "gemini returned an error");
            return Err(AppError::Llm(error_message));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AppError::Llm(format!("invalid response: {err}")))?;
        if let Some(api_error) = payload.error {
            error!(error_message = %api_error.message, "gemini returned an error");
            return Err(AppError::Llm(api_error.message));
        }

        parse_generation(payload)
    }
}

fn build_contents(turns: &[Turn]) -> Vec<Content> {
    let mut contents: Vec<Content> = Vec::new();
    for turn in turns {
        let (role, part) = match turn {
            Turn::User(text) => ("user", Part::text(text)),
            Turn::Assistant(text) => ("model", Part::text(text)),
            Turn::ToolCall(call) => (
                "model",
                Part {
                    function_call: Some(FunctionCall {
                        name: call.name.clone(),
                        args: json!({ "query": call.query }),
                    }),
                    ..Default::default()
                },
            ),
            Turn::ToolResult { name, result } => (
                "user",
                Part {
                    function_response: Some(FunctionResponse {
                        name: name.clone(),
                        response: json!({ "results": result }),
                    }),
                    ..Default::default()
                },
            ),
        };

        // consecutive turns from the same side are sent as one content block
        match contents.last_mut() {
            Some(last) if last.role.as_deref() == Some(role) => last.parts.push(part),
            _ => contents.push(Content {
                role: Some(role.to_string()),
                parts: vec![part],
            }),
        }
    }

    contents
}

fn build_tools(tools: &[ToolSpec]) -> Vec<Tool> {
    if tools.is_empty() {
        return vec![];
    }

    let declarations = tools
        .iter()
        .map(|tool| FunctionDeclaration {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "query": { "type": "STRING", "description": "The search query." }
                },
                "required": ["query"]
            }),
        })
        .collect();

    vec![Tool {
        function_declarations: declarations,
    }]
}

fn parse_generation(payload: GenerateContentResponse) -> AppResult<Generation> {
    let candidate = payload
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Llm("no candidates returned".to_string()))?;
    let parts = candidate.content.map(|content| content.parts).unwrap_or_default();

    let calls: Vec<ToolCall> = parts
        .iter()
        .filter_map(|part| part.function_call.as_ref())
        .map(|call| ToolCall {
            name: call.name.clone(),
            query: call
                .args
                .get("query")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
        .collect();
    if !calls.is_empty() {
        return Ok(Generation::ToolCalls(calls));
    }

    let text: String = parts.into_iter().filter_map(|part| part.text).collect();
    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(AppError::Llm(format!("empty response (finish reason {reason})")));
    }

    Ok(Generation::Text(text))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize, Serialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Deserialize, Serialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(
            Client::new(),
            Url::parse("https://generativelanguage.googleapis.com").unwrap(),
            "key".to_string(),
            "gemini-2.0-flash-exp".to_string(),
            4096,
        )
    }

    #[test]
    fn test_endpoint() {
        let url = client().endpoint().unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );
    }

    #[test]
    fn test_body_for_plain_completion() {
        let request = GenerationRequest::new("be brief", "hello");
        let body = serde_json::to_value(client().build_body(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "systemInstruction": { "parts": [{ "text": "be brief" }] },
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "generationConfig": { "maxOutputTokens": 4096 }
            })
        );
    }

    #[test]
    fn test_tool_turns_are_grouped_by_role() {
        let request = GenerationRequest {
            system: None,
            turns: vec![
                Turn::User("who won?".to_string()),
                Turn::ToolCall(ToolCall {
                    name: "web_search".to_string(),
                    query: "a".to_string(),
                }),
                Turn::ToolCall(ToolCall {
                    name: "web_search".to_string(),
                    query: "b".to_string(),
                }),
                Turn::ToolResult {
                    name: "web_search".to_string(),
                    result: json!([]),
                },
            ],
            tools: vec![ToolSpec {
                name: "web_search".to_string(),
                description: "Search the web for recent results.".to_string(),
            }],
        };
        let body = serde_json::to_value(client().build_body(&request)).unwrap();

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"].as_array().unwrap().len(), 2);
        assert_eq!(contents[1]["parts"][1]["functionCall"]["args"]["query"], "b");
        assert_eq!(
            contents[2]["parts"][0]["functionResponse"]["response"],
            json!({ "results": [] })
        );
        assert_eq!(
            body["tools"][0]["functionDeclarations"][0]["name"],
            "web_search"
        );
    }

    #[test]
    fn test_parse_function_calls() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "functionCall": { "name": "web_search", "args": { "query": "rust 2024" } } }]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let generation = parse_generation(payload).unwrap();
        assert_eq!(
            generation,
            Generation::ToolCalls(vec![ToolCall {
                name: "web_search".to_string(),
                query: "rust 2024".to_string()
            }])
        );
    }

    #[test]
    fn test_parse_text_parts_are_joined() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello, " }, { "text": "world" }] }
            }]
        }))
        .unwrap();

        assert_eq!(
            parse_generation(payload).unwrap(),
            Generation::Text("Hello, world".to_string())
        );
    }

    #[test]
    fn test_parse_empty_candidate_is_an_error() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();

        let err = parse_generation(payload).unwrap_err();
        assert_eq!(
            err.to_string(),
            "language model error: empty response (finish reason SAFETY)"
        );
    }
}
