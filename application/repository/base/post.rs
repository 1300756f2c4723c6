use crate::error::AppResult;
use crate::models::platform::Platform;
use crate::models::post::{NewPost, PublishedPost};

#[async_trait::async_trait]
pub trait PostRepository {
    async fn record_post(&self, post: NewPost) -> AppResult<PublishedPost>;
    /// Posts of a user, newest first.
    async fn list_posts(
        &self,
        user_id: &str,
        platform: Option<Platform>,
        limit: u32,
    ) -> AppResult<Vec<PublishedPost>>;
}
