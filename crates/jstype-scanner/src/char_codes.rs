//! Character classification used by the scanner.

/// Whether `ch` can start an identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_alphabetic())
}

/// Whether `ch` can continue an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch)
        || ch.is_ascii_digit()
        || ch == '\u{200C}'
        || ch == '\u{200D}'
        || (!ch.is_ascii() && ch.is_alphanumeric())
}

/// Line terminators recognised by ECMAScript.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace that is not a line terminator.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}'
    ) || (!ch.is_ascii() && !is_line_break(ch) && ch.is_whitespace())
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}
