//! Publishing finished text and recording it in the post history.
use tracing::info;

use crate::content::{char_len, PlatformProfile};
use crate::error::{AppError, AppResult};
use crate::models::platform::Platform;
use crate::models::post::{NewPost, PublishedPost};
use crate::repository::DynRepository;
use crate::social::{LinkedInClient, PublishReceipt, TwitterClient};

#[derive(Clone)]
pub struct Publisher {
    repository: DynRepository,
    linkedin: LinkedInClient,
    twitter: TwitterClient,
}

impl Publisher {
    pub fn new(repository: DynRepository, linkedin: LinkedInClient, twitter: TwitterClient) -> Self {
        Self {
            repository,
            linkedin,
            twitter,
        }
    }

    pub async fn publish(
        &self,
        platform: Platform,
        user_id: &str,
        content: &str,
    ) -> AppResult<PublishedPost> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::EmptyContent);
        }
        let max = PlatformProfile::for_platform(platform).max_length;
        let actual = char_len(content);
        if actual > max {
            return Err(AppError::ContentTooLong { max, actual });
        }

        let receipt = self.send(platform, user_id, content).await?;
        let post = self
            .repository
            .record_post(NewPost {
                user_id: user_id.to_string(),
                platform,
                content: content.to_string(),
                external_id: receipt.external_id,
            })
            .await?;
        info!(%platform, user_id, post_id = %post.id, "recorded published post");

        Ok(post)
    }

    async fn send(&self, platform: Platform, user_id: &str, content: &str) -> AppResult<PublishReceipt> {
        let not_authenticated = || AppError::NotAuthenticated {
            platform,
            user_id: user_id.to_string(),
        };

        match platform {
            Platform::LinkedIn => {
                let token = self
                    .repository
                    .get_linkedin_token(user_id)
                    .await?
                    .ok_or_else(not_authenticated)?;
                self.linkedin.publish(&token, content).await
            }
            Platform::Twitter => {
                let token = self
                    .repository
                    .get_twitter_token(user_id)
                    .await?
                    .ok_or_else(not_authenticated)?;
                self.twitter.publish(&token, content).await
            }
        }
    }
}
