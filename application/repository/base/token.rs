use crate::error::AppResult;
use crate::models::token::{LinkedInToken, TwitterToken};

/// Provider tokens, one per user and platform. Storing again replaces the previous token.
#[async_trait::async_trait]
pub trait TokenRepository {
    async fn store_linkedin_token(&self, token: LinkedInToken) -> AppResult<()>;
    async fn get_linkedin_token(&self, user_id: &str) -> AppResult<Option<LinkedInToken>>;
    async fn store_twitter_token(&self, token: TwitterToken) -> AppResult<()>;
    async fn get_twitter_token(&self, user_id: &str) -> AppResult<Option<TwitterToken>>;
}
