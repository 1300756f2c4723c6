use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Redirect;
use tracing::info;

use crate::api::{CallbackQuery, LoginQuery};
use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::models::platform::Platform;
use crate::models::token::LinkedInToken;

pub async fn login(
    State(app_state): State<AppState>,
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> AppResult<Redirect> {
    let Query(LoginQuery { user_id }) = query?;
    let state = app_state
        .pending
        .insert(Platform::LinkedIn, &user_id, None)
        .await;
    let url = app_state.linkedin.authorization_url(&state)?;
    info!(%user_id, "redirecting to linkedin authorization");

    Ok(Redirect::temporary(url.as_str()))
}

pub async fn callback(
    State(app_state): State<AppState>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> AppResult<Redirect> {
    let Query(query) = query?;
    let (code, state) = query.into_grant()?;
    let pending = app_state
        .pending
        .take(Platform::LinkedIn, &state)
        .await
        .ok_or(AppError::InvalidOAuthState)?;

    let access_token = app_state.linkedin.exchange_code(&code).await?;
    let linkedin_urn = app_state.linkedin.fetch_member_urn(&access_token).await?;
    app_state
        .repository
        .store_linkedin_token(LinkedInToken {
            user_id: pending.user_id.clone(),
            access_token,
            linkedin_urn,
        })
        .await?;
    info!(user_id = %pending.user_id, "linkedin connected");

    let redirect = app_state.connected_redirect(Platform::LinkedIn, &pending.user_id);
    Ok(Redirect::temporary(redirect.as_str()))
}
