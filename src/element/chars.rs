//! Character-offset helpers
//!
//! Selection and suggestion positions are counted in chars, so every slice of
//! a value goes through these instead of byte indexing.

pub fn len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the char at `idx`, clamped to the end of the string
pub fn byte_offset(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map(|(b, _)| b).unwrap_or(s.len())
}

pub fn slice(s: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_offset(s, start);
    let end_byte = byte_offset(s, end.max(start));
    &s[start_byte..end_byte]
}

pub fn before(s: &str, idx: usize) -> &str {
    &s[..byte_offset(s, idx)]
}

pub fn after(s: &str, idx: usize) -> &str {
    &s[byte_offset(s, idx)..]
}

pub fn char_at(s: &str, idx: usize) -> Option<char> {
    s.chars().nth(idx)
}

/// Replace chars `start..end` with `text`
pub fn splice(s: &str, start: usize, end: usize, text: &str) -> String {
    let mut out = String::with_capacity(s.len() + text.len());
    out.push_str(before(s, start));
    out.push_str(text);
    out.push_str(after(s, end.max(start)));
    out
}
