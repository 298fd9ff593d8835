//! Escape processing for string literal contents.
//!
//! Mirrors the teacher's per-context escape table approach (resolve a
//! small set of common escapes, push a diagnostic and substitute the
//! replacement character for anything else) but extended with the
//! `\xHH` and `\uHHHH` numeric escapes this grammar's string literals
//! support and that the teacher's (non-JS) string literals don't need.

use crate::lex_error::LexError;
use jsi_ir::Span;

#[inline]
fn resolve_common_escape(c: char) -> Option<char> {
    match c {
        '\\' => Some('\\'),
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'v' => Some('\u{b}'),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Unescape the content between a string literal's quotes. `quote` is the
/// delimiter in use (`'` or `"`); `\'`/`\"` both cook to a literal quote
/// regardless of which delimiter was used, matching real JS (unlike the
/// teacher's string/char split, this grammar has one string literal form).
///
/// Fast path: if no backslashes appear, returns `None` so the caller can
/// use the source slice directly without allocating.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32 — scripts this interpreter runs are far under u32::MAX bytes"
)]
pub(crate) fn unescape_string(
    content: &str,
    base_offset: u32,
    errors: &mut Vec<LexError>,
) -> Option<String> {
    if !content.contains('\\') {
        return None;
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '\'')) => result.push('\''),
            Some((_, '"')) => result.push('"'),
            Some((_, '\n')) => {} // line continuation: escaped newline is elided
            Some((j, 'x')) => {
                let hex: String = chars.by_ref().take(2).map(|(_, c)| c).collect();
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        let start = base_offset + i as u32;
                        errors.push(LexError::invalid_string_escape(
                            Span::new(start, base_offset + j as u32 + 1 + hex.len() as u32),
                            'x',
                        ));
                        result.push('\u{FFFD}');
                    }
                }
            }
            Some((j, 'u')) => {
                let hex: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) => result.push(ch),
                    None => {
                        let start = base_offset + i as u32;
                        errors.push(LexError::invalid_unicode_escape(Span::new(
                            start,
                            base_offset + j as u32 + 1 + hex.len() as u32,
                        )));
                        result.push('\u{FFFD}');
                    }
                }
            }
            Some((j, esc)) => {
                if let Some(resolved) = resolve_common_escape(esc) {
                    result.push(resolved);
                } else {
                    let start = base_offset + i as u32;
                    let end = base_offset + j as u32 + esc.len_utf8() as u32;
                    errors.push(LexError::invalid_string_escape(Span::new(start, end), esc));
                    // JS quietly keeps unknown escapes as the literal char
                    // (e.g. `\q` is just `q`); we follow suit and only
                    // diagnose, not substitute garbage.
                    result.push(esc);
                }
            }
            None => {
                let start = base_offset + i as u32;
                errors.push(LexError::invalid_string_escape(
                    Span::new(start, start + 1),
                    '\\',
                ));
                result.push('\\');
            }
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_escapes_is_fast_path() {
        let mut errors = Vec::new();
        assert!(unescape_string("hello", 0, &mut errors).is_none());
    }

    #[test]
    fn common_escapes() {
        let mut errors = Vec::new();
        let result = unescape_string(r"a\nb\tc", 0, &mut errors);
        assert_eq!(result.as_deref(), Some("a\nb\tc"));
        assert!(errors.is_empty());
    }

    #[test]
    fn hex_escape() {
        let mut errors = Vec::new();
        let result = unescape_string(r"\x41", 0, &mut errors);
        assert_eq!(result.as_deref(), Some("A"));
    }

    #[test]
    fn unicode_escape() {
        let mut errors = Vec::new();
        let escaped = "\\u0041";
        let result = unescape_string(escaped, 0, &mut errors);
        assert_eq!(result.as_deref(), Some("A"));
        assert!(errors.is_empty());
    }

    #[test]
    fn unknown_escape_keeps_the_char_and_warns() {
        let mut errors = Vec::new();
        let result = unescape_string(r"\q", 0, &mut errors);
        assert_eq!(result.as_deref(), Some("q"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn escaped_newline_is_a_line_continuation() {
        let mut errors = Vec::new();
        let result = unescape_string("a\\\nb", 0, &mut errors);
        assert_eq!(result.as_deref(), Some("ab"));
        assert!(errors.is_empty());
    }
}
