use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use url::Url;

use crate::auth::CODE_CHALLENGE_METHOD;
use crate::config::OAuthAppConfig;
use crate::error::{AppError, AppResult};
use crate::models::platform::Platform;
use crate::models::token::TwitterToken;
use crate::social::{json_body, PublishReceipt};

pub const X_SCOPES: &str = "tweet.read users.read tweet.write offline.access";

#[derive(Clone, Debug)]
pub struct TwitterClient {
    http: Client,
    app: OAuthAppConfig,
    auth_base: Url,
    api_base: Url,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
}

impl TwitterClient {
    pub fn new(http: Client, app: OAuthAppConfig, auth_base: Url, api_base: Url) -> Self {
        Self {
            http,
            app,
            auth_base,
            api_base,
        }
    }

    pub fn authorization_url(&self, state: &str, code_challenge: &str) -> AppResult<Url> {
        let mut url = self.auth_base.join("i/oauth2/authorize")?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.app.client_id)
            .append_pair("redirect_uri", &self.app.redirect_uri)
            .append_pair("scope", X_SCOPES)
            .append_pair("state", state)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", CODE_CHALLENGE_METHOD);

        Ok(url)
    }

    pub async fn exchange_code(&self, code: &str, code_verifier: &str) -> AppResult<String> {
        let response = self
            .http
            .post(self.api_base.join("2/oauth2/token")?)
            .basic_auth(&self.app.client_id, Some(&self.app.client_secret))
            .form(&[
                ("code", code),
                ("grant_type", "authorization_code"),
                ("client_id", self.app.client_id.as_str()),
                ("redirect_uri", self.app.redirect_uri.as_str()),
                ("code_verifier", code_verifier),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: Option<TokenResponse> = serde_json::from_value(json_body(response).await).ok();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "x token exchange rejected");
            let detail = body
                .and_then(|body| body.error_description)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(AppError::TokenExchange(detail));
        }

        body.and_then(|body| body.access_token)
            .ok_or_else(|| AppError::TokenExchange("response had no access_token".to_string()))
    }

    pub async fn fetch_user_id(&self, access_token: &str) -> AppResult<String> {
        let response = self
            .http
            .get(self.api_base.join("2/users/me")?)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        let body = json_body(response).await;
        if status != StatusCode::OK {
            return Err(AppError::ProfileLookup(format!(
                "X answered with status {status}"
            )));
        }

        body.pointer("/data/id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::ProfileLookup("failed to retrieve X user id".to_string()))
    }

    pub async fn publish(&self, token: &TwitterToken, text: &str) -> AppResult<PublishReceipt> {
        let response = self
            .http
            .post(self.api_base.join("2/tweets")?)
            .bearer_auth(&token.access_token)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        let body = json_body(response).await;
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(AppError::PublishFailed {
                platform: Platform::Twitter,
                status: status.as_u16(),
                detail: body
                    .get("detail")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let external_id = body
            .pointer("/data/id")
            .and_then(Value::as_str)
            .map(str::to_string);
        info!(user_id = %token.user_id, external_id = ?external_id, "published tweet");

        Ok(PublishReceipt {
            external_id,
            response: body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url_carries_pkce_challenge() {
        let client = TwitterClient::new(
            Client::new(),
            OAuthAppConfig {
                client_id: "x-id".to_string(),
                client_secret: "x-secret".to_string(),
                redirect_uri: "http://localhost:8000/auth/x/callback".to_string(),
            },
            Url::parse("https://x.com").unwrap(),
            Url::parse("https://api.x.com").unwrap(),
        );

        let url = client.authorization_url("state-1", "challenge-1").unwrap();

        assert_eq!(url.host_str(), Some("x.com"));
        assert_eq!(url.path(), "/i/oauth2/authorize");
        let query: std::collections::HashMap<String, String> =
            url.query_pairs().into_owned().collect();
        assert_eq!(query["scope"], X_SCOPES);
        assert_eq!(query["state"], "state-1");
        assert_eq!(query["code_challenge"], "challenge-1");
        assert_eq!(query["code_challenge_method"], "S256");
        assert_eq!(query["client_id"], "x-id");
    }
}
