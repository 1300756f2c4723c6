use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::models::platform::Platform;
use crate::models::post::PublishedPost;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: String,
    pub platform: Option<String>,
    pub limit: Option<u32>,
}

pub async fn list_posts(
    State(app_state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<Vec<PublishedPost>>> {
    let Query(query) = query?;
    let platform = query
        .platform
        .as_deref()
        .map(str::parse::<Platform>)
        .transpose()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let posts = app_state
        .repository
        .list_posts(&query.user_id, platform, limit)
        .await?;

    Ok(Json(posts))
}
