use tracing::info;

use crate::agent::WebAgent;
use crate::content::{
    apply_hashtag_policy, clean_content, process_generated, HashtagPolicy, PlatformProfile,
};
use crate::error::{AppError, AppResult};
use crate::models::draft::Draft;
use crate::models::platform::Platform;

/// Turns a topic into a publishable draft: research, rewrite for the platform, tidy up.
#[derive(Clone)]
pub struct PostComposer {
    agent: WebAgent,
}

impl PostComposer {
    pub fn new(agent: WebAgent) -> Self {
        Self { agent }
    }

    pub async fn research_and_draft(
        &self,
        platform: Platform,
        query: &str,
        max_length: Option<usize>,
        hashtag_policy: Option<HashtagPolicy>,
    ) -> AppResult<Draft> {
        let profile = PlatformProfile::for_platform(platform);
        let max_length = resolve_max_length(profile, max_length)?;
        let hashtag_policy = hashtag_policy.unwrap_or(profile.default_hashtag_policy);

        info!(%platform, max_length, %hashtag_policy, "researching topic");
        let raw = self.agent.invoke(query).await?;
        if raw.trim().is_empty() {
            return Err(AppError::EmptyContent);
        }

        let prompt = profile.render_prompt(&clean_content(&raw, platform), max_length);
        let generated = self
            .agent
            .llm()
            .complete(profile.system_prompt, &prompt)
            .await?;
        let formatted = process_generated(&generated, max_length, profile)?;
        let content = apply_hashtag_policy(&formatted, hashtag_policy, max_length);

        let draft = Draft::new(platform, content, max_length, hashtag_policy);
        info!(%platform, char_count = draft.char_count, "draft ready");

        Ok(draft)
    }
}

fn resolve_max_length(profile: &PlatformProfile, requested: Option<usize>) -> AppResult<usize> {
    match requested {
        None => Ok(profile.max_length),
        Some(length) if (profile.min_length..=profile.max_length).contains(&length) => Ok(length),
        Some(length) => Err(AppError::InvalidMaxLength {
            requested: length,
            min: profile.min_length,
            max: profile.max_length,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_length_defaults_to_platform_limit() {
        let profile = PlatformProfile::for_platform(Platform::Twitter);
        assert_eq!(resolve_max_length(profile, None).unwrap(), 280);
        assert_eq!(resolve_max_length(profile, Some(200)).unwrap(), 200);
    }

    #[test]
    fn test_max_length_outside_platform_range() {
        let profile = PlatformProfile::for_platform(Platform::Twitter);

        assert!(matches!(
            resolve_max_length(profile, Some(281)),
            Err(AppError::InvalidMaxLength { max: 280, .. })
        ));
        assert!(resolve_max_length(profile, Some(5)).is_err());
    }
}
