use crate::content::PlatformProfile;

/// Length in characters, which is what the platforms count.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Shortens `content` to at most `max_length` characters, preferring to cut at
/// one of the profile's break points when one falls late enough in the text.
pub fn smart_truncate(content: &str, max_length: usize, profile: &PlatformProfile) -> String {
    if char_len(content) <= max_length {
        return content.to_string();
    }

    let truncated = take_chars(content, max_length);
    let threshold = max_length as f64 * profile.truncate_threshold;
    for point in profile.break_points {
        if let Some(idx) = truncated.rfind(point) {
            let position = char_len(&truncated[..idx]);
            if position as f64 > threshold {
                return format!("{}...", truncated[..idx].trim());
            }
        }
    }

    format!("{}...", take_chars(content, max_length.saturating_sub(3)))
}
