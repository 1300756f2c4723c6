use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::platform::Platform;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("user {user_id} is not authenticated with {platform}")]
    NotAuthenticated { platform: Platform, user_id: String },
    #[error("invalid or expired OAuth state")]
    InvalidOAuthState,
    #[error("{error}: {description}")]
    OAuthDenied { error: String, description: String },
    #[error("failed to obtain access token: {0}")]
    TokenExchange(String),
    #[error("failed to fetch user profile: {0}")]
    ProfileLookup(String),
    #[error("content is too short ({actual} characters, minimum is {min})")]
    ContentTooShort { min: usize, actual: usize },
    #[error("content is too long ({actual} characters, maximum is {max})")]
    ContentTooLong { max: usize, actual: usize },
    #[error("no content generated")]
    EmptyContent,
    #[error("max_length {requested} is outside the allowed range {min}..={max}")]
    InvalidMaxLength {
        requested: usize,
        min: usize,
        max: usize,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("unknown hashtag policy {0}")]
    InvalidHashtagPolicy(String),
    #[error("{platform} API error ({status}): {detail}")]
    PublishFailed {
        platform: Platform,
        status: u16,
        detail: String,
    },
    #[error("search failed: {0}")]
    Search(String),
    #[error("language model error: {0}")]
    Llm(String),
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("upstream request failed")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
    #[error("unexpected error")]
    Other(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotAuthenticated { .. } => StatusCode::UNAUTHORIZED,
            AppError::InvalidOAuthState => StatusCode::BAD_REQUEST,
            AppError::OAuthDenied { .. } => StatusCode::BAD_REQUEST,
            AppError::TokenExchange(_) => StatusCode::BAD_REQUEST,
            AppError::ProfileLookup(_) => StatusCode::BAD_REQUEST,
            AppError::ContentTooShort { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ContentTooLong { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyContent => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidMaxLength { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidHashtagPolicy(_) => StatusCode::BAD_REQUEST,
            AppError::PublishFailed { .. } => StatusCode::BAD_GATEWAY,
            AppError::Search(_) => StatusCode::BAD_GATEWAY,
            AppError::Llm(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        match &self {
            AppError::Database(err) => {
                let error_message = err.to_string();
                let error_type = "sqlx".to_string();
                error!(error_message, error_type, "unexpected error");
            }
            AppError::Http(err) => {
                let error_message = err.to_string();
                let error_type = "reqwest".to_string();
                error!(error_message, error_type, "upstream request failed");
            }
            _ => {}
        }

        let detail = &self.to_string();
        let payload = json!({ "errors": [{ "detail": detail }] });
        (status_code, Json(payload)).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let error_message = err.to_string();
        let error_type = "serde_json".to_string();
        error!(error_message, error_type, "unexpected error");
        Self::Other(error_message)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        let error_message = err.to_string();
        let error_type = "url".to_string();
        error!(error_message, error_type, "unexpected error");
        Self::Other(error_message)
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authenticated_is_unauthorized() {
        let err = AppError::NotAuthenticated {
            platform: Platform::LinkedIn,
            user_id: "bruce".to_string(),
        };

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.to_string(),
            "user bruce is not authenticated with linkedin"
        );
    }

    #[test]
    fn test_oauth_denied_message_matches_provider_format() {
        let err = AppError::OAuthDenied {
            error: "access_denied".to_string(),
            description: "user cancelled".to_string(),
        };

        assert_eq!(err.to_string(), "access_denied: user cancelled");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_publish_failure_is_bad_gateway() {
        let err = AppError::PublishFailed {
            platform: Platform::Twitter,
            status: 403,
            detail: "Forbidden".to_string(),
        };

        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "twitter API error (403): Forbidden");
    }
}
