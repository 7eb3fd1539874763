//! Lexical definitions shared by the reader, the writer and the CSV adapter.
//!
//! The grammar in `grammar.pest` mirrors these character classes; keep the two
//! in step.

use super::parser::is_number;

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

pub const WHITESPACE_CHARS: &[char] = &['\t', ' ', '\n', '\r'];

/// Characters that end an atom. `.` is only structural outside a number.
pub const STRUCTURE_CHARS: &[char] = &['"', '#', '[', ']', '`', '.'];

/// Characters legal in atoms today but rejected by [`is_valid_name`].
pub const RESERVED_CHARS: &[char] = &['(', ')', '{', '}', '\\', '$', ':', ','];

pub const OPEN_STRING: char = '"';
pub const CLOSE_STRING: char = '"';
pub const OPEN_LIST: char = '[';
pub const CLOSE_LIST: char = ']';
pub const QUOTE_CHAR: char = '`';
pub const INDEX_CHAR: char = '.';
pub const COLOR_CHAR: char = '#';
pub const LINE_COMMENT: &str = ";";
pub const OPEN_BLOCK_COMMENT: &str = "#|";
pub const CLOSE_BLOCK_COMMENT: &str = "|#";

/// Head atom of the canonical list form of the index operator.
pub const INDEX_KEYWORD: &str = "Index";

pub fn is_whitespace(c: char) -> bool {
    WHITESPACE_CHARS.contains(&c)
}

pub fn is_structure(c: char) -> bool {
    STRUCTURE_CHARS.contains(&c)
}

pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

// ============================================================================
// QUOTING
// ============================================================================

/// True when `s` is wrapped in explicit string delimiters.
pub fn is_explicit(s: &str) -> bool {
    s.len() >= 2 && s.starts_with(OPEN_STRING) && s.ends_with(CLOSE_STRING)
}

/// Strips one level of explicit string delimiters, if present.
pub fn distill(s: &str) -> &str {
    if is_explicit(s) {
        return &s[OPEN_STRING.len_utf8()..s.len() - CLOSE_STRING.len_utf8()];
    }
    s
}

/// True when an atom's text must be written between string delimiters to
/// survive a round trip.
pub fn should_be_explicit(s: &str) -> bool {
    !is_color_literal(s) && s.chars().any(|c| is_whitespace(c) || is_structure(c))
}

/// True for names that identifier validation accepts: non-empty, free of
/// whitespace, structural and reserved characters, and not a number.
pub fn is_valid_name(s: &str) -> bool {
    !s.is_empty()
        && !s
            .chars()
            .any(|c| is_whitespace(c) || is_structure(c) || is_reserved(c))
        && !is_number(s)
}

// ============================================================================
// COLOR LITERALS
// ============================================================================

/// True for `#` followed by one or more hex digits.
pub fn is_color_literal(s: &str) -> bool {
    s.strip_prefix(COLOR_CHAR)
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Decodes packed big-endian RGBA hex digits into channels in `0.0..=1.0`.
///
/// Hex that does not fit a `u32` decodes as transparent black.
pub fn decode_color(hex: &str) -> [f32; 4] {
    let packed = u32::from_str_radix(hex, 16).unwrap_or(0);
    packed.to_be_bytes().map(|channel| f32::from(channel) / 255.0)
}

/// Textual form of a color channel as stored in a [`Number`](super::Node::Number).
pub fn format_channel(channel: f32) -> String {
    channel.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_quoting() {
        assert!(is_explicit("\"a b\""));
        assert!(!is_explicit("\""));
        assert_eq!(distill("\"a b\""), "a b");
        assert_eq!(distill("ab"), "ab");
        assert_eq!(distill("\"\""), "");
    }

    #[test]
    fn should_be_explicit_checks_structure_and_color() {
        assert!(should_be_explicit("a b"));
        assert!(should_be_explicit("a.b"));
        assert!(should_be_explicit("#zz"));
        assert!(!should_be_explicit("#FF00FF"));
        assert!(!should_be_explicit("abc"));
        assert!(!should_be_explicit("a(b)"));
    }

    #[test]
    fn valid_names_reject_reserved_and_numbers() {
        assert!(is_valid_name("Player"));
        assert!(!is_valid_name("a:b"));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("12"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn decode_color_unpacks_rgba() {
        assert_eq!(decode_color("FF000080"), [1.0, 0.0, 0.0, 128.0 / 255.0]);
        assert_eq!(decode_color("FF"), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(decode_color("123456789"), [0.0; 4]);
    }

    #[test]
    fn channels_format_as_shortest_decimal() {
        assert_eq!(format_channel(1.0), "1");
        assert_eq!(format_channel(0.0), "0");
    }
}
