use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use postwright::error::AppResult;
use postwright::models::platform::Platform;
use postwright::models::post::{NewPost, PublishedPost};
use postwright::models::token::{LinkedInToken, TwitterToken};
use postwright::repository::{PostRepository, TokenRepository};

#[derive(Debug, Default)]
pub struct MemoryRepository {
    linkedin: RwLock<HashMap<String, LinkedInToken>>,
    twitter: RwLock<HashMap<String, TwitterToken>>,
    posts: RwLock<Vec<PublishedPost>>,
}

impl MemoryRepository {
    pub async fn post_count(&self) -> usize {
        self.posts.read().await.len()
    }
}

#[async_trait]
impl TokenRepository for MemoryRepository {
    async fn store_linkedin_token(&self, token: LinkedInToken) -> AppResult<()> {
        let mut lock = self.linkedin.write().await;
        lock.insert(token.user_id.clone(), token);

        Ok(())
    }

    async fn get_linkedin_token(&self, user_id: &str) -> AppResult<Option<LinkedInToken>> {
        let lock = self.linkedin.read().await;
        Ok(lock.get(user_id).cloned())
    }

    async fn store_twitter_token(&self, token: TwitterToken) -> AppResult<()> {
        let mut lock = self.twitter.write().await;
        lock.insert(token.user_id.clone(), token);

        Ok(())
    }

    async fn get_twitter_token(&self, user_id: &str) -> AppResult<Option<TwitterToken>> {
        let lock = self.twitter.read().await;
        Ok(lock.get(user_id).cloned())
    }
}

#[async_trait]
impl PostRepository for MemoryRepository {
    async fn record_post(&self, post: NewPost) -> AppResult<PublishedPost> {
        let published = post.into_published(Uuid::new_v4(), Utc::now());
        let mut lock = self.posts.write().await;
        lock.push(published.clone());

        Ok(published)
    }

    async fn list_posts(
        &self,
        user_id: &str,
        platform: Option<Platform>,
        limit: u32,
    ) -> AppResult<Vec<PublishedPost>> {
        let lock = self.posts.read().await;
        let posts = lock
            .iter()
            .rev()
            .filter(|post| post.user_id == user_id)
            .filter(|post| platform.map_or(true, |platform| post.platform == platform))
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(posts)
    }
}
