//! Title cleanup for use inside a filename.

/// Linux NAME_MAX: longest single path component, in bytes.
pub const NAME_MAX: usize = 255;

/// Makes a display title safe to embed in a filename.
///
/// - Replaces spaces with `.`
/// - Replaces NUL, `/`, `\` and control characters with `_`
///
/// Everything else (including non-ASCII letters) is kept as-is.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            ' ' => '.',
            '\0' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a character.
pub fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}
