//! Text processing applied to generated posts.
//!
//! Everything here is pure: the LLM output goes in, publishable text comes out.
mod hashtags;
mod markdown;
mod profile;
mod truncate;

pub use hashtags::{apply_hashtag_policy, extract_hashtags, HashtagPolicy};
pub use markdown::clean_content;
pub use profile::PlatformProfile;
pub use truncate::{char_len, smart_truncate};

use crate::error::{AppError, AppResult};

/// Cleans generated text, enforces the platform minimum and fits it into `max_length`.
pub fn process_generated(
    text: &str,
    max_length: usize,
    profile: &PlatformProfile,
) -> AppResult<String> {
    let cleaned = clean_content(text, profile.platform);
    let actual = char_len(&cleaned);
    if actual < profile.min_length {
        return Err(AppError::ContentTooShort {
            min: profile.min_length,
            actual,
        });
    }

    Ok(smart_truncate(&cleaned, max_length, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::platform::Platform;

    #[test]
    fn test_short_tweets_are_rejected() {
        let profile = PlatformProfile::for_platform(Platform::Twitter);
        let err = process_generated("**hi** there", 280, profile).unwrap_err();

        assert!(matches!(
            err,
            AppError::ContentTooShort { min: 15, actual: 8 }
        ));
    }

    #[test]
    fn test_linkedin_minimum_is_higher() {
        let profile = PlatformProfile::for_platform(Platform::LinkedIn);
        let text = "A perfectly reasonable tweet, but not a LinkedIn post.";

        assert!(process_generated(text, 3000, profile).is_err());
        assert!(process_generated(text, 280, PlatformProfile::for_platform(Platform::Twitter)).is_ok());
    }

    #[test]
    fn test_processed_text_is_cleaned_and_truncated() {
        let profile = PlatformProfile::for_platform(Platform::Twitter);
        let text = format!("**Big news.** {}", "word ".repeat(80));

        let processed = process_generated(&text, 100, profile).unwrap();

        assert!(processed.starts_with("Big news."));
        assert!(processed.ends_with("..."));
        assert!(char_len(&processed) <= 100);
    }
}
