use regex::Regex;
use std::sync::OnceLock;

use crate::models::platform::Platform;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
    twitter_only: bool,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str, twitter_only: bool) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("markdown rule should compile"),
            replacement,
            twitter_only,
        }
    }
}

// Order matters: links are unwrapped before images are dropped.
fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new(r"(?s)\*\*(.*?)\*\*", "${1}", false),
            Rule::new(r"(?s)\*(.*?)\*", "${1}", false),
            Rule::new(r"(?m)^#+[ \t]+", "", false),
            Rule::new(r"(?s)\[(.*?)\]\(.*?\)", "${1}", false),
            Rule::new(r"(?s)!\[.*?\]\(.*?\)", "", false),
            Rule::new(r"(?s)`{3}.*?`{3}", "", true),
            Rule::new(r"(?s)`(.*?)`", "${1}", true),
            Rule::new(r"(?s)<.*?>", "", false),
            Rule::new(r"&[a-z]+;", "", false),
            Rule::new(r"[\\_~>]", "", false),
        ]
    })
}

/// Strips markdown and HTML formatting the model tends to emit.
///
/// Code spans are only removed for X, where they are never rendered; LinkedIn
/// keeps backticks as typed.
pub fn clean_content(text: &str, platform: Platform) -> String {
    let mut text = text.to_string();
    for rule in rules() {
        if rule.twitter_only && platform != Platform::Twitter {
            continue;
        }
        text = rule
            .pattern
            .replace_all(&text, rule.replacement)
            .into_owned();
    }

    text.trim().to_string()
}
