use crate::content::HashtagPolicy;
use crate::models::platform::Platform;

/// Per-platform limits and prompts used when drafting a post.
#[derive(Debug)]
pub struct PlatformProfile {
    pub platform: Platform,
    pub max_length: usize,
    pub min_length: usize,
    pub truncate_threshold: f64,
    pub break_points: &'static [&'static str],
    pub system_prompt: &'static str,
    pub template: &'static str,
    pub default_hashtag_policy: HashtagPolicy,
}

const LINKEDIN_TEMPLATE: &str = "**LinkedIn Post Creation**
Create professional content from this input:
- Remove ALL markdown/formatting
- Use business-appropriate tone
- Add 1-2 relevant emojis
- Include 3-5 industry-specific hashtags
- Maintain paragraph structure
- Strict {char_limit} character limit
- Preserve key insights

Input:
{content}";

const TWITTER_TEMPLATE: &str = "**Social Media Post Creation**
Create engaging content from this input:
- Remove ALL markdown/formatting
- Use Twitter-friendly tone
- Add 1-3 relevant emojis
- Include 2-3 hashtags
- Strict {char_limit} character limit
- Preserve key information

Input:
{content}";

static LINKEDIN: PlatformProfile = PlatformProfile {
    platform: Platform::LinkedIn,
    max_length: 3000,
    min_length: 100,
    truncate_threshold: 0.8,
    break_points: &["\n\n", ". ", "! ", "? ", "; ", ", "],
    system_prompt: "You are a professional LinkedIn content creator.",
    template: LINKEDIN_TEMPLATE,
    default_hashtag_policy: HashtagPolicy::Professional,
};

static TWITTER: PlatformProfile = PlatformProfile {
    platform: Platform::Twitter,
    max_length: 280,
    min_length: 15,
    truncate_threshold: 0.75,
    break_points: &[". ", "! ", "? ", "\n\n", "\n", "; ", ", "],
    system_prompt: "You are a professional social media content creator.",
    template: TWITTER_TEMPLATE,
    default_hashtag_policy: HashtagPolicy::Smart,
};

impl PlatformProfile {
    pub fn for_platform(platform: Platform) -> &'static PlatformProfile {
        match platform {
            Platform::LinkedIn => &LINKEDIN,
            Platform::Twitter => &TWITTER,
        }
    }

    pub fn render_prompt(&self, content: &str, char_limit: usize) -> String {
        self.template
            .replace("{char_limit}", &char_limit.to_string())
            .replace("{content}", content)
    }
}
