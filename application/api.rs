//! The REST surface: OAuth connect flows, post generation and publishing, history.
mod health;
mod history;
mod linkedin_auth;
mod posts;
mod twitter_auth;

use axum::middleware;
use axum::routing::{get, post, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::auth::rate_limit;
use crate::error::{AppError, AppResult};

pub fn build_router(state: AppState) -> Router {
    let limited = Router::new()
        .route("/linkedin/post", post(posts::post_to_linkedin))
        .route("/twitter/post", post(posts::post_to_twitter))
        .route("/linkedin/draft", post(posts::draft_for_linkedin))
        .route("/twitter/draft", post(posts::draft_for_twitter))
        .route("/linkedin/publish", post(posts::publish_to_linkedin))
        .route("/twitter/publish", post(posts::publish_to_twitter))
        .route_layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/login/linkedin", get(linkedin_auth::login))
        .route("/auth/linkedin/callback", get(linkedin_auth::callback))
        .route("/login/x", get(twitter_auth::login))
        .route("/auth/x/callback", get(twitter_auth::callback))
        .route("/posts", get(history::list_posts))
        .merge(limited)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub user_id: String,
}

/// What the provider sends back to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackQuery {
    /// Splits the callback into `(code, state)`, surfacing a provider-side denial first.
    fn into_grant(self) -> AppResult<(String, String)> {
        if let Some(error) = self.error {
            return Err(AppError::OAuthDenied {
                error,
                description: self
                    .error_description
                    .unwrap_or_else(|| "No description provided".to_string()),
            });
        }
        let state = self.state.ok_or(AppError::InvalidOAuthState)?;
        let code = self
            .code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| AppError::TokenExchange("missing authorization code".to_string()))?;

        Ok((code, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_wins_over_code() {
        let query = CallbackQuery {
            code: Some("abc".to_string()),
            state: Some("s".to_string()),
            error: Some("access_denied".to_string()),
            error_description: None,
        };

        let err = query.into_grant().unwrap_err();
        assert_eq!(err.to_string(), "access_denied: No description provided");
    }

    #[test]
    fn test_missing_state_is_invalid() {
        let query = CallbackQuery {
            code: Some("abc".to_string()),
            state: None,
            error: None,
            error_description: None,
        };

        assert!(matches!(
            query.into_grant(),
            Err(AppError::InvalidOAuthState)
        ));
    }
}
