use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::platform::Platform;

/// A post as recorded after the platform accepted it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PublishedPost {
    pub id: Uuid,
    pub user_id: String,
    pub platform: Platform,
    pub content: String,
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewPost {
    pub user_id: String,
    pub platform: Platform,
    pub content: String,
    pub external_id: Option<String>,
}

impl NewPost {
    pub fn into_published(self, id: Uuid, created_at: DateTime<Utc>) -> PublishedPost {
        PublishedPost {
            id,
            user_id: self.user_id,
            platform: self.platform,
            content: self.content,
            external_id: self.external_id,
            created_at,
        }
    }
}
