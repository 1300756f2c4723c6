use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Redirect;
use tracing::info;

use crate::api::{CallbackQuery, LoginQuery};
use crate::app_state::AppState;
use crate::auth::generate_pkce;
use crate::error::{AppError, AppResult};
use crate::models::platform::Platform;
use crate::models::token::TwitterToken;

pub async fn login(
    State(app_state): State<AppState>,
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> AppResult<Redirect> {
    let Query(LoginQuery { user_id }) = query?;
    let pkce = generate_pkce();
    let state = app_state
        .pending
        .insert(Platform::Twitter, &user_id, Some(pkce.verifier))
        .await;
    let url = app_state.twitter.authorization_url(&state, &pkce.challenge)?;
    info!(%user_id, "redirecting to x authorization");

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
        .take(Platform::Twitter, &state)
        .await
        .ok_or(AppError::InvalidOAuthState)?;
    let code_verifier = pending
        .code_verifier
        .as_deref()
        .ok_or(AppError::InvalidOAuthState)?;

    let access_token = app_state
        .twitter
        .exchange_code(&code, code_verifier)
        .await?;
    let x_user_id = app_state.twitter.fetch_user_id(&access_token).await?;
    app_state
        .repository
        .store_twitter_token(TwitterToken {
            user_id: pending.user_id.clone(),
            access_token,
            x_user_id,
        })
        .await?;
    info!(user_id = %pending.user_id, "x connected");

    let redirect = app_state.connected_redirect(Platform::Twitter, &pending.user_id);
    Ok(Redirect::temporary(redirect.as_str()))
}
