//! Masking rules for API keys.
//!
//! Lengths count chars, not bytes, so a multibyte key is never cut inside a
//! code point.

/// Keys longer than this many chars are shortened to head + "..." + tail.
pub const MASK_THRESHOLD: usize = 10;

/// Chars kept at each end of a shortened key.
pub const VISIBLE_EDGE: usize = 12;

/// Chars in the placeholder shown without an entitlement.
pub const PLACEHOLDER_LEN: usize = 33;

pub const DEFAULT_MASK_CHAR: char = '•';

/// Shorten a key to its first and last `VISIBLE_EDGE` chars.
///
/// Keys of 11..=22 chars have overlapping head and tail, so the result is
/// longer than the key itself. That is kept as is.
pub fn masked_form(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= MASK_THRESHOLD {
        return secret.to_owned();
    }
    let head: String = secret.chars().take(VISIBLE_EDGE).collect();
    let tail: String = secret
        .chars()
        .skip(len.saturating_sub(VISIBLE_EDGE))
        .collect();
    format!("{head}...{tail}")
}

/// Constant-length placeholder. Leaks nothing about the key, not even its length.
pub fn placeholder(mask_char: char) -> String {
    std::iter::repeat_n(mask_char, PLACEHOLDER_LEN).collect()
}

/// What the viewer sees, using the default mask character.
pub fn display_value(secret: &str, entitled: bool) -> String {
    display_value_with(secret, entitled, DEFAULT_MASK_CHAR)
}

pub fn display_value_with(secret: &str, entitled: bool, mask_char: char) -> String {
    if entitled {
        masked_form(secret)
    } else {
        placeholder(mask_char)
    }
}
