use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use url::Url;

use crate::config::OAuthAppConfig;
use crate::error::{AppError, AppResult};
use crate::models::platform::Platform;
use crate::models::token::LinkedInToken;
use crate::social::{json_body, PublishReceipt};

pub const LINKEDIN_SCOPES: &str = "openid profile email w_member_social";

#[derive(Clone, Debug)]
pub struct LinkedInClient {
    http: Client,
    app: OAuthAppConfig,
    auth_base: Url,
    api_base: Url,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: Option<String>,
}

impl LinkedInClient {
    pub fn new(http: Client, app: OAuthAppConfig, auth_base: Url, api_base: Url) -> Self {
        Self {
            http,
            app,
            auth_base,
            api_base,
        }
    }

    pub fn authorization_url(&self, state: &str) -> AppResult<Url> {
        let mut url = self.auth_base.join("oauth/v2/authorization")?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.app.client_id)
            .append_pair("redirect_uri", &self.app.redirect_uri)
            .append_pair("state", state)
            .append_pair("scope", LINKEDIN_SCOPES);

        Ok(url)
    }

    pub async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let response = self
            .http
            .post(self.auth_base.join("oauth/v2/accessToken")?)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.app.redirect_uri.as_str()),
                ("client_id", self.app.client_id.as_str()),
                ("client_secret", self.app.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "linkedin token exchange rejected");
            return Err(AppError::TokenExchange(format!(
                "LinkedIn answered with status {status}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|_| AppError::TokenExchange("malformed token response".to_string()))?;
        body.access_token
            .ok_or_else(|| AppError::TokenExchange("response had no access_token".to_string()))
    }

    /// The member id (`sub` claim) used to build the `urn:li:person:` author URN.
    pub async fn fetch_member_urn(&self, access_token: &str) -> AppResult<String> {
        let response = self
            .http
            .get(self.api_base.join("v2/userinfo")?)
            .bearer_auth(access_token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(AppError::ProfileLookup(format!(
                "LinkedIn answered with status {}",
                response.status()
            )));
        }

        let userinfo: UserInfo = response
            .json()
            .await
            .map_err(|_| AppError::ProfileLookup("malformed userinfo response".to_string()))?;
        userinfo
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| AppError::ProfileLookup("failed to retrieve LinkedIn URN".to_string()))
    }

    pub async fn publish(&self, token: &LinkedInToken, text: &str) -> AppResult<PublishReceipt> {
        let post = share_body(&token.author_urn(), text);
        let response = self
            .http
            .post(self.api_base.join("v2/ugcPosts")?)
            .bearer_auth(&token.access_token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .json(&post)
            .send()
            .await?;

        let status = response.status();
        let header_id = response
            .headers()
            .get("x-restli-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = json_body(response).await;
        if status != StatusCode::CREATED {
            return Err(AppError::PublishFailed {
                platform: Platform::LinkedIn,
                status: status.as_u16(),
                detail: body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| body.to_string()),
            });
        }

        let external_id = body
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(header_id);
        info!(user_id = %token.user_id, external_id = ?external_id, "published linkedin post");

        Ok(PublishReceipt {
            external_id,
            response: body,
        })
    }
}

fn share_body(author: &str, text: &str) -> Value {
    json!({
        "author": author,
        "lifecycleState": "PUBLISHED",
        "specificContent": {
            "com.linkedin.ugc.ShareContent": {
                "shareCommentary": { "text": text },
                "shareMediaCategory": "NONE"
            }
        },
        "visibility": {
            "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
        }
    })
}
