//! Application name normalization.

/// Maximum length of a sanitized application name.
pub const MAX_APP_NAME_LEN: usize = 50;

/// Normalize a user supplied name into a cluster-safe application name.
///
/// Lowercases, replaces every character outside `[a-z0-9-]` with `-`,
/// trims hyphens from both ends and truncates to [`MAX_APP_NAME_LEN`].
/// The result never starts or ends with a hyphen, so the function is
/// idempotent. Empty input gives an empty name.
pub fn sanitize_app_name(name: &str) -> String {
    let replaced: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '-',
        })
        .collect();

    let trimmed = replaced.trim_matches('-');
    // All remaining characters are ASCII, so byte and char offsets agree.
    let truncated = &trimmed[..trimmed.len().min(MAX_APP_NAME_LEN)];
    truncated.trim_end_matches('-').to_string()
}
