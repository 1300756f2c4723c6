use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::content::truncate::char_len;
use crate::error::AppError;

/// How many of the generated hashtags are kept, and whether length matters.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HashtagPolicy {
    /// Drop every hashtag.
    None,
    /// Up to 3, only if all of them would fit.
    Smart,
    /// Up to 5, regardless of length.
    Aggressive,
    /// Up to 5, only if all of them would fit.
    Professional,
    /// Up to 7, regardless of length.
    Industry,
}

impl HashtagPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashtagPolicy::None => "none",
            HashtagPolicy::Smart => "smart",
            HashtagPolicy::Aggressive => "aggressive",
            HashtagPolicy::Professional => "professional",
            HashtagPolicy::Industry => "industry",
        }
    }

    fn limit(&self) -> usize {
        match self {
            HashtagPolicy::None => 0,
            HashtagPolicy::Smart => 3,
            HashtagPolicy::Aggressive | HashtagPolicy::Professional => 5,
            HashtagPolicy::Industry => 7,
        }
    }

    fn checks_length(&self) -> bool {
        matches!(self, HashtagPolicy::Smart | HashtagPolicy::Professional)
    }
}

impl fmt::Display for HashtagPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashtagPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(HashtagPolicy::None),
            "smart" => Ok(HashtagPolicy::Smart),
            "aggressive" => Ok(HashtagPolicy::Aggressive),
            "professional" => Ok(HashtagPolicy::Professional),
            "industry" => Ok(HashtagPolicy::Industry),
            other => Err(AppError::InvalidHashtagPolicy(other.to_string())),
        }
    }
}

fn hashtag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#\S+").expect("hashtag regex should compile"))
}

pub fn extract_hashtags(content: &str) -> Vec<&str> {
    hashtag_regex()
        .find_iter(content)
        .map(|m| m.as_str())
        .collect()
}

/// Pulls every hashtag out of `content` and appends back the ones `policy` allows
/// as a final paragraph.
pub fn apply_hashtag_policy(content: &str, policy: HashtagPolicy, max_length: usize) -> String {
    let hashtags = extract_hashtags(content);
    let clean = hashtag_regex().replace_all(content, "").trim().to_string();

    if policy == HashtagPolicy::None {
        return clean;
    }

    if policy.checks_length() && char_len(&clean) + char_len(&hashtags.join(" ")) > max_length {
        return clean;
    }

    let kept: Vec<&str> = hashtags.into_iter().take(policy.limit()).collect();
    format!("{}\n\n{}", clean, kept.join(" ")).trim().to_string()
}
