use serde::{Deserialize, Serialize};

use crate::content::HashtagPolicy;
use crate::models::platform::Platform;

/// Generated post text that has not been published yet.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Draft {
    pub platform: Platform,
    pub content: String,
    pub char_count: usize,
    pub max_length: usize,
    pub hashtag_policy: HashtagPolicy,
}

impl Draft {
    pub fn new(
        platform: Platform,
        content: String,
        max_length: usize,
        hashtag_policy: HashtagPolicy,
    ) -> Self {
        Self {
            platform,
            char_count: content.chars().count(),
            content,
            max_length,
            hashtag_policy,
        }
    }
}
