//! Scanner state machine.
//!
//! The scanner is pulled by the parser one token at a time. Context-dependent
//! tokens (`/` versus a regular expression, `}` versus a template
//! continuation) are scanned with the context-free reading first and
//! re-scanned on request, the same way the parser asks for them.
//!
//! Comments are trivia: each one is recorded as a `CommentRange`, and the
//! comments skipped before a token are that token's leading comments.

use crate::SyntaxKind;
use crate::char_codes::{
    is_digit, is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line,
};
use jstype_common::CommentRange;

/// A lexical error at a byte span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub pos: u32,
    pub length: u32,
    pub message: String,
}

/// Saved scanner state for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    token_comment_start: usize,
    comment_count: usize,
    error_count: usize,
}

impl ScannerSnapshot {
    /// Number of lexical errors recorded when the snapshot was taken.
    pub fn error_count(&self) -> usize {
        self.error_count
    }
}

pub struct ScannerState {
    text: String,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    /// Cooked value of the current token (identifier name, string contents)
    token_value: String,
    preceding_line_break: bool,
    /// Index into `comments` of the first leading comment of the current token
    token_comment_start: usize,
    comments: Vec<CommentRange>,
    errors: Vec<ScanError>,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        let mut scanner = ScannerState {
            text,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            preceding_line_break: false,
            token_comment_start: 0,
            comments: Vec::new(),
            errors: Vec::new(),
        };
        scanner.skip_hashbang();
        scanner
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start of the current token, trivia excluded.
    pub fn token_pos(&self) -> u32 {
        self.token_start as u32
    }

    /// End of the current token.
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Cooked token value: identifier name, string/template contents,
    /// or the raw text for numbers and regular expressions.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    /// Index range into `comments()` of the current token's leading comments.
    pub fn leading_comment_range(&self) -> (u32, u32) {
        (self.token_comment_start as u32, self.comments.len() as u32)
    }

    pub fn comments(&self) -> &[CommentRange] {
        &self.comments
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    /// Consume the scanner, returning the source text, the comments and
    /// the lexical errors it recorded.
    pub fn into_parts(self) -> (String, Vec<CommentRange>, Vec<ScanError>) {
        (self.text, self.comments, self.errors)
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            token_comment_start: self.token_comment_start,
            comment_count: self.comments.len(),
            error_count: self.errors.len(),
        }
    }

    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.token_comment_start = snapshot.token_comment_start;
        self.comments.truncate(snapshot.comment_count);
        self.errors.truncate(snapshot.error_count);
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset..)?.chars().next()
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    fn error(&mut self, pos: usize, length: usize, message: &str) {
        self.errors.push(ScanError {
            pos: pos as u32,
            length: length as u32,
            message: message.to_string(),
        });
    }

    fn skip_hashbang(&mut self) {
        if self.text.starts_with("#!") {
            let end = self.text.find(['\n', '\r']).unwrap_or(self.text.len());
            self.pos = end;
        }
    }

    fn finish(&mut self, kind: SyntaxKind, length: usize) -> SyntaxKind {
        self.pos += length;
        self.token = kind;
        kind
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_comment_start = self.comments.len();
        self.preceding_line_break = false;
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.peek_char() else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            if is_line_break(ch) {
                self.preceding_line_break = true;
                self.pos += ch.len_utf8();
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
                continue;
            }

            return match ch {
                '/' => match self.byte_at(1) {
                    Some(b'/') => {
                        self.scan_line_comment();
                        continue;
                    }
                    Some(b'*') => {
                        self.scan_block_comment();
                        continue;
                    }
                    Some(b'=') => self.finish(SyntaxKind::SlashEqualsToken, 2),
                    _ => self.finish(SyntaxKind::SlashToken, 1),
                },
                '"' | '\'' => self.scan_string(ch),
                '`' => {
                    self.pos += 1;
                    self.scan_template(true)
                }
                '0'..='9' => self.scan_number(),
                '.' => {
                    if self.char_at(1).is_some_and(is_digit) {
                        self.scan_number()
                    } else if self.byte_at(1) == Some(b'.') && self.byte_at(2) == Some(b'.') {
                        self.finish(SyntaxKind::DotDotDotToken, 3)
                    } else {
                        self.finish(SyntaxKind::DotToken, 1)
                    }
                }
                '{' => self.finish(SyntaxKind::OpenBraceToken, 1),
                '}' => self.finish(SyntaxKind::CloseBraceToken, 1),
                '(' => self.finish(SyntaxKind::OpenParenToken, 1),
                ')' => self.finish(SyntaxKind::CloseParenToken, 1),
                '[' => self.finish(SyntaxKind::OpenBracketToken, 1),
                ']' => self.finish(SyntaxKind::CloseBracketToken, 1),
                ';' => self.finish(SyntaxKind::SemicolonToken, 1),
                ',' => self.finish(SyntaxKind::CommaToken, 1),
                ':' => self.finish(SyntaxKind::ColonToken, 1),
                '~' => self.finish(SyntaxKind::TildeToken, 1),
                '@' => self.finish(SyntaxKind::AtToken, 1),
                '?' => self.scan_question(),
                '=' => match (self.byte_at(1), self.byte_at(2)) {
                    (Some(b'='), Some(b'=')) => self.finish(SyntaxKind::EqualsEqualsEqualsToken, 3),
                    (Some(b'='), _) => self.finish(SyntaxKind::EqualsEqualsToken, 2),
                    (Some(b'>'), _) => self.finish(SyntaxKind::EqualsGreaterThanToken, 2),
                    _ => self.finish(SyntaxKind::EqualsToken, 1),
                },
                '!' => match (self.byte_at(1), self.byte_at(2)) {
                    (Some(b'='), Some(b'=')) => {
                        self.finish(SyntaxKind::ExclamationEqualsEqualsToken, 3)
                    }
                    (Some(b'='), _) => self.finish(SyntaxKind::ExclamationEqualsToken, 2),
                    _ => self.finish(SyntaxKind::ExclamationToken, 1),
                },
                '+' => match self.byte_at(1) {
                    Some(b'+') => self.finish(SyntaxKind::PlusPlusToken, 2),
                    Some(b'=') => self.finish(SyntaxKind::PlusEqualsToken, 2),
                    _ => self.finish(SyntaxKind::PlusToken, 1),
                },
                '-' => match self.byte_at(1) {
                    Some(b'-') => self.finish(SyntaxKind::MinusMinusToken, 2),
                    Some(b'=') => self.finish(SyntaxKind::MinusEqualsToken, 2),
                    _ => self.finish(SyntaxKind::MinusToken, 1),
                },
                '*' => match (self.byte_at(1), self.byte_at(2)) {
                    (Some(b'*'), Some(b'=')) => {
                        self.finish(SyntaxKind::AsteriskAsteriskEqualsToken, 3)
                    }
                    (Some(b'*'), _) => self.finish(SyntaxKind::AsteriskAsteriskToken, 2),
                    (Some(b'='), _) => self.finish(SyntaxKind::AsteriskEqualsToken, 2),
                    _ => self.finish(SyntaxKind::AsteriskToken, 1),
                },
                '%' => match self.byte_at(1) {
                    Some(b'=') => self.finish(SyntaxKind::PercentEqualsToken, 2),
                    _ => self.finish(SyntaxKind::PercentToken, 1),
                },
                '^' => match self.byte_at(1) {
                    Some(b'=') => self.finish(SyntaxKind::CaretEqualsToken, 2),
                    _ => self.finish(SyntaxKind::CaretToken, 1),
                },
                '&' => match (self.byte_at(1), self.byte_at(2)) {
                    (Some(b'&'), Some(b'=')) => {
                        self.finish(SyntaxKind::AmpersandAmpersandEqualsToken, 3)
                    }
                    (Some(b'&'), _) => self.finish(SyntaxKind::AmpersandAmpersandToken, 2),
                    (Some(b'='), _) => self.finish(SyntaxKind::AmpersandEqualsToken, 2),
                    _ => self.finish(SyntaxKind::AmpersandToken, 1),
                },
                '|' => match (self.byte_at(1), self.byte_at(2)) {
                    (Some(b'|'), Some(b'=')) => self.finish(SyntaxKind::BarBarEqualsToken, 3),
                    (Some(b'|'), _) => self.finish(SyntaxKind::BarBarToken, 2),
                    (Some(b'='), _) => self.finish(SyntaxKind::BarEqualsToken, 2),
                    _ => self.finish(SyntaxKind::BarToken, 1),
                },
                '<' => match (self.byte_at(1), self.byte_at(2)) {
                    (Some(b'<'), Some(b'=')) => {
                        self.finish(SyntaxKind::LessThanLessThanEqualsToken, 3)
                    }
                    (Some(b'<'), _) => self.finish(SyntaxKind::LessThanLessThanToken, 2),
                    (Some(b'='), _) => self.finish(SyntaxKind::LessThanEqualsToken, 2),
                    _ => self.finish(SyntaxKind::LessThanToken, 1),
                },
                '>' => self.scan_greater_than(),
                '#' => {
                    if self.char_at(1).is_some_and(is_identifier_start) {
                        self.pos += 1;
                        self.scan_identifier_rest();
                        self.token = SyntaxKind::PrivateIdentifier;
                        self.token
                    } else {
                        self.error(self.pos, 1, "Invalid character.");
                        self.finish(SyntaxKind::Unknown, 1)
                    }
                }
                c if is_identifier_start(c) => self.scan_identifier(),
                c => {
                    let len = c.len_utf8();
                    self.error(self.pos, len, "Invalid character.");
                    self.finish(SyntaxKind::Unknown, len)
                }
            };
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'?'), Some(b'=')) => self.finish(SyntaxKind::QuestionQuestionEqualsToken, 3),
            (Some(b'?'), _) => self.finish(SyntaxKind::QuestionQuestionToken, 2),
            // `a?.5:b` is a conditional, not optional chaining
            (Some(b'.'), next) if !next.is_some_and(|b| b.is_ascii_digit()) => {
                self.finish(SyntaxKind::QuestionDotToken, 2)
            }
            _ => self.finish(SyntaxKind::QuestionToken, 1),
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        let rest = &self.text.as_bytes()[self.pos..];
        if rest.starts_with(b">>>=") {
            self.finish(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4)
        } else if rest.starts_with(b">>>") {
            self.finish(SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3)
        } else if rest.starts_with(b">>=") {
            self.finish(SyntaxKind::GreaterThanGreaterThanEqualsToken, 3)
        } else if rest.starts_with(b">>") {
            self.finish(SyntaxKind::GreaterThanGreaterThanToken, 2)
        } else if rest.starts_with(b">=") {
            self.finish(SyntaxKind::GreaterThanEqualsToken, 2)
        } else {
            self.finish(SyntaxKind::GreaterThanToken, 1)
        }
    }

    fn scan_line_comment(&mut self) {
        let start = self.pos;
        self.pos += 2;
        while let Some(ch) = self.peek_char() {
            if is_line_break(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        let has_trailing_new_line = self.pos < self.text.len();
        self.comments.push(CommentRange::new(
            start as u32,
            self.pos as u32,
            false,
            has_trailing_new_line,
        ));
    }

    fn scan_block_comment(&mut self) {
        let start = self.pos;
        let body_start = start + 2;
        let bytes = self.text.as_bytes();
        let end = match memchr::memmem::find(&bytes[body_start..], b"*/") {
            Some(offset) => body_start + offset + 2,
            None => {
                self.error(start, 2, "'*/' expected.");
                self.text.len()
            }
        };

        if self.text[start..end].chars().any(is_line_break) {
            self.preceding_line_break = true;
        }
        self.pos = end;

        let has_trailing_new_line = self.peek_char().is_some_and(is_line_break);
        self.comments.push(CommentRange::new(
            start as u32,
            end as u32,
            true,
            has_trailing_new_line,
        ));
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        self.scan_identifier_rest();
        self.token = SyntaxKind::keyword_from_text(&self.token_value).unwrap_or(SyntaxKind::Identifier);
        self.token
    }

    fn scan_identifier_rest(&mut self) {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value = self.text[start..self.pos].to_string();
    }

    fn scan_digits(&mut self, radix: u32) {
        while let Some(ch) = self.peek_char() {
            if ch == '_' || ch.is_digit(radix) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut kind = SyntaxKind::NumericLiteral;

        let radix = match (self.byte_at(0), self.byte_at(1)) {
            (Some(b'0'), Some(b'x' | b'X')) => 16,
            (Some(b'0'), Some(b'o' | b'O')) => 8,
            (Some(b'0'), Some(b'b' | b'B')) => 2,
            _ => 10,
        };

        if radix != 10 {
            self.pos += 2;
            let digits_start = self.pos;
            self.scan_digits(radix);
            if self.pos == digits_start {
                self.error(start, self.pos - start, "Digit expected.");
            }
            if self.byte_at(0) == Some(b'n') {
                self.pos += 1;
                kind = SyntaxKind::BigIntLiteral;
            }
        } else {
            self.scan_digits(10);
            let mut is_integer = true;
            if self.byte_at(0) == Some(b'.') {
                is_integer = false;
                self.pos += 1;
                self.scan_digits(10);
            }
            if matches!(self.byte_at(0), Some(b'e' | b'E')) {
                let exponent_start = self.pos;
                self.pos += 1;
                if matches!(self.byte_at(0), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                let digits_start = self.pos;
                self.scan_digits(10);
                if self.pos == digits_start {
                    self.error(exponent_start, self.pos - exponent_start, "Digit expected.");
                }
                is_integer = false;
            }
            if is_integer && self.byte_at(0) == Some(b'n') {
                self.pos += 1;
                kind = SyntaxKind::BigIntLiteral;
            }
        }

        if self.peek_char().is_some_and(is_identifier_start) {
            self.error(
                self.pos,
                1,
                "An identifier or keyword cannot immediately follow a numeric literal.",
            );
        }

        self.token_value = self.text[start..self.pos].to_string();
        self.token = kind;
        kind
    }

    /// Read a hex escape of exactly `count` digits after the current position.
    fn read_hex_digits(&mut self, count: usize) -> Option<u32> {
        let digits = self.text.get(self.pos..self.pos + count)?;
        let value = u32::from_str_radix(digits, 16).ok()?;
        self.pos += count;
        Some(value)
    }

    /// Scan an escape sequence; the current position is just past the backslash.
    fn scan_escape_sequence(&mut self, out: &mut String) {
        let escape_start = self.pos - 1;
        let Some(ch) = self.peek_char() else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !self.peek_char().is_some_and(is_digit) => out.push('\0'),
            'x' => match self.read_hex_digits(2).and_then(char::from_u32) {
                Some(c) => out.push(c),
                None => self.error(escape_start, self.pos - escape_start, "Hexadecimal digit expected."),
            },
            'u' => {
                let value = if self.byte_at(0) == Some(b'{') {
                    let close = self.text[self.pos..].find('}');
                    match close {
                        Some(offset) => {
                            let digits = &self.text[self.pos + 1..self.pos + offset];
                            let value = u32::from_str_radix(digits, 16).ok();
                            self.pos += offset + 1;
                            value
                        }
                        None => None,
                    }
                } else {
                    self.read_hex_digits(4)
                };
                match value {
                    // Lone surrogates cannot be represented in a Rust string
                    Some(v) => out.push(char::from_u32(v).unwrap_or('\u{FFFD}')),
                    None => self.error(
                        escape_start,
                        self.pos - escape_start,
                        "Hexadecimal digit expected.",
                    ),
                }
            }
            '\r' => {
                // Line continuation
                if self.byte_at(0) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek_char() else {
                self.error(start, self.pos - start, "Unterminated string literal.");
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\n' || ch == '\r' {
                self.error(start, self.pos - start, "Unterminated string literal.");
                break;
            }
            self.pos += ch.len_utf8();
            if ch == '\\' {
                self.scan_escape_sequence(&mut value);
            } else {
                value.push(ch);
            }
        }
        self.token_value = value;
        self.token = SyntaxKind::StringLiteral;
        self.token
    }

    /// Scan template characters up to the next backtick or `${`.
    /// The current position is just past the opening backtick or `}`.
    fn scan_template(&mut self, starts_with_backtick: bool) -> SyntaxKind {
        let mut value = String::new();
        let kind = loop {
            let Some(ch) = self.peek_char() else {
                self.error(
                    self.token_start,
                    self.pos - self.token_start,
                    "Unterminated template literal.",
                );
                break if starts_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            if ch == '`' {
                self.pos += 1;
                break if starts_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            }
            if ch == '$' && self.byte_at(1) == Some(b'{') {
                self.pos += 2;
                break if starts_with_backtick {
                    SyntaxKind::TemplateHead
                } else {
                    SyntaxKind::TemplateMiddle
                };
            }
            self.pos += ch.len_utf8();
            if ch == '\\' {
                self.scan_escape_sequence(&mut value);
            } else {
                value.push(ch);
            }
        };
        self.token_value = value;
        self.token = kind;
        kind
    }

    /// Re-scan the current `/` or `/=` token as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut in_escape = false;
        let mut in_class = false;
        loop {
            let Some(ch) = self.peek_char() else {
                self.error(
                    self.token_start,
                    self.pos - self.token_start,
                    "Unterminated regular expression literal.",
                );
                break;
            };
            if is_line_break(ch) {
                self.error(
                    self.token_start,
                    self.pos - self.token_start,
                    "Unterminated regular expression literal.",
                );
                break;
            }
            self.pos += ch.len_utf8();
            if in_escape {
                in_escape = false;
            } else if ch == '\\' {
                in_escape = true;
            } else if ch == '[' {
                in_class = true;
            } else if ch == ']' {
                in_class = false;
            } else if ch == '/' && !in_class {
                // Flags
                while let Some(flag) = self.peek_char() {
                    if !is_identifier_part(flag) {
                        break;
                    }
                    self.pos += flag.len_utf8();
                }
                break;
            }
        }
        self.token_value = self.text[self.token_start..self.pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    // =========================================================================
    // JSX
    // =========================================================================

    /// Scan the next token inside JSX element children: text runs up to
    /// `<` or `{`, and the `<`, `</` and `{` that end them. No trivia is
    /// skipped; whitespace and `//` belong to the text.
    pub fn scan_jsx_token(&mut self) -> SyntaxKind {
        self.token_comment_start = self.comments.len();
        self.preceding_line_break = false;
        self.token_value.clear();
        self.token_start = self.pos;

        match self.byte_at(0) {
            None => {
                self.token = SyntaxKind::EndOfFileToken;
                self.token
            }
            Some(b'<') if self.byte_at(1) == Some(b'/') => {
                self.finish(SyntaxKind::LessThanSlashToken, 2)
            }
            Some(b'<') => self.finish(SyntaxKind::LessThanToken, 1),
            Some(b'{') => self.finish(SyntaxKind::OpenBraceToken, 1),
            Some(_) => {
                let rest = &self.text.as_bytes()[self.pos..];
                let len = memchr::memchr2(b'<', b'{', rest).unwrap_or(rest.len());
                self.token_value = self.text[self.pos..self.pos + len].to_string();
                if self.token_value.chars().any(is_line_break) {
                    self.preceding_line_break = true;
                }
                self.finish(SyntaxKind::JsxText, len)
            }
        }
    }

    /// Extend the current identifier or keyword over `-` so that
    /// `data-id` and `my-element` read as one JSX name.
    pub fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        if !self.token.is_identifier_or_keyword() {
            return self.token;
        }
        while let Some(ch) = self.peek_char() {
            if ch != '-' && !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value = self.text[self.token_start..self.pos].to_string();
        self.token = SyntaxKind::Identifier;
        self.token
    }

    /// Re-scan the current string literal as a JSX attribute value: no
    /// escape sequences, and line breaks are allowed.
    pub fn rescan_jsx_attribute_value(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::StringLiteral {
            return self.token;
        }
        let start = self.token_start;
        self.errors.retain(|err| (err.pos as usize) < start);
        let Some(quote) = self.text[start..].chars().next() else {
            return self.token;
        };
        let body_start = start + quote.len_utf8();
        match self.text[body_start..].find(quote) {
            Some(offset) => {
                self.token_value = self.text[body_start..body_start + offset].to_string();
                self.pos = body_start + offset + quote.len_utf8();
            }
            None => {
                self.token_value = self.text[body_start..].to_string();
                self.pos = self.text.len();
                self.error(start, self.pos - start, "Unterminated string literal.");
            }
        }
        self.token
    }

    /// Re-scan a token beginning with `>` (`>>`, `>=`, ...) as a lone `>`,
    /// which is how every JSX tag ends.
    pub fn rescan_greater_than_token(&mut self) -> SyntaxKind {
        if self.token_text().starts_with('>') {
            self.pos = self.token_start + 1;
            self.token = SyntaxKind::GreaterThanToken;
        }
        self.token
    }

    /// Re-scan the current `}` token as the continuation of a template.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.scan_template(false)
    }
}
