use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::app_state::AppState;
use crate::content::HashtagPolicy;
use crate::error::AppResult;
use crate::models::draft::Draft;
use crate::models::platform::Platform;
use crate::models::post::PublishedPost;

#[derive(Debug, Deserialize)]
pub struct PostQuery {
    pub user_id: String,
    pub query: String,
    pub max_length: Option<usize>,
    pub hashtag_policy: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DraftQuery {
    pub query: String,
    pub max_length: Option<usize>,
    pub hashtag_policy: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub user_id: String,
    pub content: String,
}

fn parse_policy(policy: Option<&str>) -> AppResult<Option<HashtagPolicy>> {
    policy.map(str::parse).transpose()
}

async fn draft(app_state: &AppState, platform: Platform, query: DraftQuery) -> AppResult<Draft> {
    let policy = parse_policy(query.hashtag_policy.as_deref())?;
    app_state
        .composer
        .research_and_draft(platform, &query.query, query.max_length, policy)
        .await
}

async fn research_and_publish(
    app_state: &AppState,
    platform: Platform,
    query: PostQuery,
) -> AppResult<PublishedPost> {
    let draft = draft(
        app_state,
        platform,
        DraftQuery {
            query: query.query,
            max_length: query.max_length,
            hashtag_policy: query.hashtag_policy,
        },
    )
    .await?;

    app_state
        .publisher
        .publish(platform, &query.user_id, &draft.content)
        .await
}

pub async fn post_to_linkedin(
    State(app_state): State<AppState>,
    query: Result<Query<PostQuery>, QueryRejection>,
) -> AppResult<Json<PublishedPost>> {
    let Query(query) = query?;
    let post = research_and_publish(&app_state, Platform::LinkedIn, query).await?;
    Ok(Json(post))
}

pub async fn post_to_twitter(
    State(app_state): State<AppState>,
    query: Result<Query<PostQuery>, QueryRejection>,
) -> AppResult<Json<PublishedPost>> {
    let Query(query) = query?;
    let post = research_and_publish(&app_state, Platform::Twitter, query).await?;
    Ok(Json(post))
}

pub async fn draft_for_linkedin(
    State(app_state): State<AppState>,
    query: Result<Query<DraftQuery>, QueryRejection>,
) -> AppResult<Json<Draft>> {
    let Query(query) = query?;
    let draft = draft(&app_state, Platform::LinkedIn, query).await?;
    Ok(Json(draft))
}

pub async fn draft_for_twitter(
    State(app_state): State<AppState>,
    query: Result<Query<DraftQuery>, QueryRejection>,
) -> AppResult<Json<Draft>> {
    let Query(query) = query?;
    let draft = draft(&app_state, Platform::Twitter, query).await?;
    Ok(Json(draft))
}

pub async fn publish_to_linkedin(
    State(app_state): State<AppState>,
    request: Result<Json<PublishRequest>, JsonRejection>,
) -> AppResult<Json<PublishedPost>> {
    let Json(request) = request?;
    let post = app_state
        .publisher
        .publish(Platform::LinkedIn, &request.user_id, &request.content)
        .await?;
    Ok(Json(post))
}

pub async fn publish_to_twitter(
    State(app_state): State<AppState>,
    request: Result<Json<PublishRequest>, JsonRejection>,
) -> AppResult<Json<PublishedPost>> {
    let Json(request) = request?;
    let post = app_state
        .publisher
        .publish(Platform::Twitter, &request.user_id, &request.content)
        .await?;
    Ok(Json(post))
}
