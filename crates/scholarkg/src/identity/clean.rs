//! Key cleaning for identifier minting.

/// Characters replaced by `_` before a key is embedded in an identifier.
///
/// The first group is the punctuation and mis-decoded encoding debris
/// (`Ã`, `¨`, `¢`, `µ`) found in the source exports. The second group is
/// everything else that is not allowed inside an IRI.
pub const UNSAFE_CHARS: &[char] = &[
    ' ', '"', '!', '.', ':', '\'', ',', '?', '@', '|', '/', '+', '&', '[', ']', '*', '$', '=',
    'Ã', '¨', '¢', 'µ',
    '<', '>', '{', '}', '\\', '^', '`', '#', '%',
];

/// Whether `c` must be replaced in an identifier.
pub fn is_unsafe(c: char) -> bool {
    c.is_whitespace() || c.is_control() || UNSAFE_CHARS.contains(&c)
}

/// Replace every unsafe character of a trimmed key with `_`.
///
/// ```rust
/// use scholarkg::identity::clean_key;
///
/// assert_eq!(clean_key("Jane Smith"), "Jane_Smith");
/// assert_eq!(clean_key(" O'Neil, J. "), "O_Neil__J_");
/// ```
pub fn clean_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if is_unsafe(c) { '_' } else { c })
        .collect()
}
