use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::platform::Platform;
use crate::models::post::{NewPost, PublishedPost};
use crate::repository::base::PostRepository;
use crate::repository::PostgresRepository;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: String,
    platform: String,
    content: String,
    external_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for PublishedPost {
    type Error = AppError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let platform = row
            .platform
            .parse::<Platform>()
            .map_err(|err| AppError::Other(err.to_string()))?;

        Ok(PublishedPost {
            id: row.id,
            user_id: row.user_id,
            platform,
            content: row.content,
            external_id: row.external_id,
            created_at: row.created_at,
        })
    }
}

#[async_trait::async_trait]
impl PostRepository for PostgresRepository {
    async fn record_post(&self, post: NewPost) -> AppResult<PublishedPost> {
        let row = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (id, user_id, platform, content, external_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, user_id, platform, content, external_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&post.user_id)
        .bind(post.platform.as_str())
        .bind(&post.content)
        .bind(&post.external_id)
        .fetch_one(self.pool())
        .await?;

        row.try_into()
    }

    async fn list_posts(
        &self,
        user_id: &str,
        platform: Option<Platform>,
        limit: u32,
    ) -> AppResult<Vec<PublishedPost>> {
        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, user_id, platform, content, external_id, created_at
             FROM posts
             WHERE user_id = $1 AND ($2::text IS NULL OR platform = $2)
             ORDER BY created_at DESC
             LIMIT $3",
        )
        .bind(user_id)
        .bind(platform.map(|platform| platform.as_str()))
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(PublishedPost::try_from).collect()
    }
}
