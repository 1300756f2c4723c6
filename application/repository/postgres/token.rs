use crate::error::AppResult;
use crate::models::token::{LinkedInToken, TwitterToken};
use crate::repository::base::TokenRepository;
use crate::repository::PostgresRepository;

#[async_trait::async_trait]
impl TokenRepository for PostgresRepository {
    async fn store_linkedin_token(&self, token: LinkedInToken) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO linkedin_tokens (user_id, access_token, linkedin_urn)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE
             SET access_token = EXCLUDED.access_token,
                 linkedin_urn = EXCLUDED.linkedin_urn,
                 updated_at = now()",
        )
        .bind(&token.user_id)
        .bind(&token.access_token)
        .bind(&token.linkedin_urn)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn get_linkedin_token(&self, user_id: &str) -> AppResult<Option<LinkedInToken>> {
        let token = sqlx::query_as::<_, LinkedInToken>(
            "SELECT user_id, access_token, linkedin_urn FROM linkedin_tokens WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(token)
    }

    async fn store_twitter_token(&self, token: TwitterToken) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO twitter_tokens (user_id, access_token, x_user_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE
             SET access_token = EXCLUDED.access_token,
                 x_user_id = EXCLUDED.x_user_id,
                 updated_at = now()",
        )
        .bind(&token.user_id)
        .bind(&token.access_token)
        .bind(&token.x_user_id)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn get_twitter_token(&self, user_id: &str) -> AppResult<Option<TwitterToken>> {
        let token = sqlx::query_as::<_, TwitterToken>(
            "SELECT user_id, access_token, x_user_id FROM twitter_tokens WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(token)
    }
}
