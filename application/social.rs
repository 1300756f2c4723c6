//! Clients for the social networks' OAuth and publishing APIs.
mod linkedin;
mod twitter;

use reqwest::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use linkedin::{LinkedInClient, LINKEDIN_SCOPES};
pub use twitter::{TwitterClient, X_SCOPES};

/// What a platform told us about a post it accepted.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PublishReceipt {
    pub external_id: Option<String>,
    pub response: Value,
}

/// Reads a body as JSON, falling back to `null` for empty or non-JSON bodies.
async fn json_body(response: Response) -> Value {
    match response.text().await {
        Ok(text) => serde_json::from_str(&text).unwrap_or(Value::Null),
        Err(_) => Value::Null,
    }
}
