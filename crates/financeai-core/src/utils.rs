//! Small helpers shared by the backends and services

/// Fresh record identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Lowercase, replace every character outside `[a-z0-9]` with `-`, then
/// collapse runs of `-`. Leading and trailing dashes are kept.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug
}

/// Slug for a generated article: the slugified topic plus a millisecond stamp
pub fn generated_slug(topic: &str, timestamp_millis: i64) -> String {
    format!("{}-{}", slugify(topic), timestamp_millis)
}

/// Minutes to read, one minute per 200 characters, rounded up
pub fn estimate_read_time(content: &str) -> i32 {
    let chars = content.chars().count();
    chars.div_ceil(200).try_into().unwrap_or(i32::MAX)
}
