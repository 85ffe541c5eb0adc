//! Byte cursor over module source
//!
//! The scanner works on the UTF-8 bytes of a `&str`. Every delimiter the
//! scanner cares about is ASCII, so most stepping is per byte; characters
//! outside ASCII are decoded only where identifiers or Unicode whitespace
//! can appear.
//!
//! The cursor is `Copy`: a construct lookahead clones it, walks ahead, and
//! either commits the clone back or drops it.

use crate::kit::lexer::chars::{
    is_ascii_id_continue, is_ascii_id_start, is_id_continue, is_id_start, is_js_whitespace,
    is_line_terminator, line_terminator_len,
};
use crate::module::Range;

/// What a run of whitespace and comments contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trivia {
    /// A line terminator was crossed (inside a block comment counts)
    pub newline: bool,
    /// Offset of a `/*` that never closed
    pub unterminated_comment: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    /// A `/` before this offset is never read as a regex: a literal
    /// starting there already ran into this line end.
    regex_fence: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            regex_fence: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    #[inline]
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.bytes().get(self.pos + n).copied()
    }

    #[inline]
    pub fn check(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    pub fn check_str(&self, s: &str) -> bool {
        self.bytes()[self.pos.min(self.source.len())..].starts_with(s.as_bytes())
    }

    #[inline]
    pub fn bump(&mut self) {
        if self.pos < self.source.len() {
            self.pos += 1;
        }
    }

    pub fn bump_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    pub fn match_byte(&mut self, b: u8) -> bool {
        if self.check(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Decode the character at the cursor; `None` at end of input or when
    /// the cursor sits inside a multi-byte character.
    pub fn peek_char(&self) -> Option<char> {
        self.source.get(self.pos..)?.chars().next()
    }

    /// Advance over one whole character (one byte if it cannot be decoded)
    pub fn bump_char(&mut self) {
        match self.peek_char() {
            Some(c) => self.pos += c.len_utf8(),
            None => self.bump(),
        }
    }

    /// Text between `start` and the cursor
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or("")
    }

    /// Length of the line terminator at the cursor, or 0
    #[inline]
    pub fn line_terminator_len(&self) -> usize {
        line_terminator_len(self.bytes(), self.pos)
    }

    /// Skip whitespace, line terminators and comments
    pub fn skip_trivia(&mut self) -> Trivia {
        let mut trivia = Trivia::default();
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | 0x0B | 0x0C) => self.pos += 1,
                Some(b'\n' | b'\r') => {
                    trivia.newline = true;
                    self.pos += 1;
                }
                Some(b'/') => match self.peek_at(1) {
                    Some(b'/') => self.skip_line(),
                    Some(b'*') => {
                        let start = self.pos;
                        if !self.skip_block_comment(&mut trivia.newline) {
                            trivia.unterminated_comment = Some(start);
                        }
                    }
                    _ => break,
                },
                Some(b) if b >= 0x80 => match self.peek_char() {
                    Some(c) if is_js_whitespace(c) => {
                        trivia.newline |= is_line_terminator(c);
                        self.pos += c.len_utf8();
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        trivia
    }

    /// Move to the next line terminator without consuming it
    pub fn skip_line(&mut self) {
        let bytes = self.bytes();
        while self.pos < bytes.len() && line_terminator_len(bytes, self.pos) == 0 {
            self.pos += 1;
        }
    }

    /// Cursor on `/*`. Returns false when the comment runs to end of input.
    fn skip_block_comment(&mut self, newline: &mut bool) -> bool {
        let bytes = self.bytes();
        let mut i = self.pos + 2;
        while i < bytes.len() {
            if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                self.pos = i + 2;
                return true;
            }
            if line_terminator_len(bytes, i) > 0 {
                *newline = true;
            }
            i += 1;
        }
        self.pos = bytes.len();
        false
    }

    /// Cursor on an opening quote. On success the cursor ends after the
    /// closing quote; otherwise it stops at the offending line terminator or
    /// at end of input.
    pub fn skip_string(&mut self, quote: u8) -> bool {
        self.pos += 1;
        loop {
            match self.peek() {
                None => return false,
                Some(b'\\') => {
                    self.pos += 1;
                    match self.line_terminator_len() {
                        0 => self.bump(),
                        n => self.pos += n,
                    }
                }
                Some(b'\n' | b'\r') => return false,
                Some(b) if b == quote => {
                    self.pos += 1;
                    return true;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Cursor on a backtick. Skips the whole template including nested
    /// interpolations.
    pub fn skip_template(&mut self) -> bool {
        self.pos += 1;
        loop {
            match self.peek() {
                None => return false,
                Some(b'\\') => self.bump_n(2),
                Some(b'`') => {
                    self.pos += 1;
                    return true;
                }
                Some(b'$') if self.peek_at(1) == Some(b'{') => {
                    self.pos += 2;
                    if !self.skip_balanced(b'}') {
                        return false;
                    }
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Cursor on `/`. Skips a regex literal when one may start here and
    /// returns true; otherwise consumes only the `/` as a division.
    pub fn skip_slash(&mut self, regex_allowed: bool) -> bool {
        if regex_allowed && self.pos >= self.regex_fence {
            let mut probe = *self;
            if probe.skip_regex() {
                *self = probe;
                return true;
            }
            self.regex_fence = self.regex_fence.max(probe.pos);
        }
        self.pos += 1;
        false
    }

    /// Cursor on `/`. On failure the cursor stops at the line terminator
    /// or at end of input that cut the literal short.
    fn skip_regex(&mut self) -> bool {
        self.pos += 1;
        let mut in_class = false;
        loop {
            if self.line_terminator_len() > 0 {
                return false;
            }
            match self.peek() {
                None => return false,
                Some(b'\\') => {
                    self.pos += 1;
                    if self.line_terminator_len() > 0 {
                        return false;
                    }
                    self.bump();
                }
                Some(b'[') => {
                    in_class = true;
                    self.pos += 1;
                }
                Some(b']') => {
                    in_class = false;
                    self.pos += 1;
                }
                Some(b'/') if !in_class => {
                    self.pos += 1;
                    while self
                        .peek()
                        .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_' || c == b'$')
                    {
                        self.pos += 1;
                    }
                    return true;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Skip code up to and including the `close` byte that balances an
    /// already consumed opener
    pub fn skip_balanced(&mut self, close: u8) -> bool {
        let mut expected = vec![close];
        let mut regex_allowed = true;
        loop {
            self.skip_trivia();
            let Some(b) = self.peek() else {
                return false;
            };
            match b {
                b'"' | b'\'' => {
                    if !self.skip_string(b) {
                        return false;
                    }
                    regex_allowed = false;
                }
                b'`' => {
                    if !self.skip_template() {
                        return false;
                    }
                    regex_allowed = false;
                }
                b'(' | b'[' | b'{' => {
                    expected.push(closer_for(b));
                    self.pos += 1;
                    regex_allowed = true;
                }
                b')' | b']' | b'}' => {
                    self.pos += 1;
                    if expected.pop() != Some(b) {
                        return false;
                    }
                    if expected.is_empty() {
                        return true;
                    }
                    regex_allowed = false;
                }
                b'/' => regex_allowed = !self.skip_slash(regex_allowed),
                _ => {
                    regex_allowed = !ends_operand(b);
                    self.bump_char();
                }
            }
        }
    }

    /// Skip an initializer expression up to (not including) a `,` or closer
    /// at nesting level zero.
    pub fn skip_initializer(&mut self) -> bool {
        let mut regex_allowed = true;
        loop {
            self.skip_trivia();
            let Some(b) = self.peek() else {
                return false;
            };
            match b {
                b',' | b')' | b']' | b'}' => return true,
                b'"' | b'\'' => {
                    if !self.skip_string(b) {
                        return false;
                    }
                    regex_allowed = false;
                }
                b'`' => {
                    if !self.skip_template() {
                        return false;
                    }
                    regex_allowed = false;
                }
                b'(' | b'[' | b'{' => {
                    self.pos += 1;
                    if !self.skip_balanced(closer_for(b)) {
                        return false;
                    }
                    regex_allowed = false;
                }
                b'/' => regex_allowed = !self.skip_slash(regex_allowed),
                _ => {
                    regex_allowed = !ends_operand(b);
                    self.bump_char();
                }
            }
        }
    }

    /// Whether an identifier starts at the cursor
    pub fn at_identifier_start(&self) -> bool {
        match self.peek() {
            Some(b) if b < 0x80 => is_ascii_id_start(b),
            Some(_) => self.peek_char().is_some_and(is_id_start),
            None => false,
        }
    }

    /// Whether the character at byte `at` continues an identifier
    fn continues_identifier(&self, at: usize) -> bool {
        match self.bytes().get(at) {
            Some(&b) if b < 0x80 => is_ascii_id_continue(b),
            Some(_) => self
                .source
                .get(at..)
                .and_then(|s| s.chars().next())
                .is_some_and(is_id_continue),
            None => false,
        }
    }

    /// Consume an identifier name (keywords included) and return its range
    pub fn read_identifier(&mut self) -> Option<Range> {
        if !self.at_identifier_start() {
            return None;
        }
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b'\\') => self.skip_unicode_escape(),
                Some(b) if b < 0x80 => {
                    if !is_ascii_id_continue(b) {
                        break;
                    }
                    self.pos += 1;
                }
                Some(_) => match self.peek_char() {
                    Some(c) if is_id_continue(c) => self.pos += c.len_utf8(),
                    _ => break,
                },
                None => break,
            }
        }
        Some(Range::new(start, self.pos))
    }

    /// `\uXXXX` or `\u{X...}`; a lone backslash is consumed as one byte
    fn skip_unicode_escape(&mut self) {
        self.pos += 1;
        if !self.match_byte(b'u') {
            return;
        }
        if self.match_byte(b'{') {
            while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            self.match_byte(b'}');
        } else {
            let mut n = 0;
            while n < 4 && self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
                n += 1;
            }
        }
    }

    /// Whether `word` follows at the cursor as a whole identifier
    pub fn check_word(&self, word: &str) -> bool {
        self.check_str(word) && !self.continues_identifier(self.pos + word.len())
    }

    /// Consume `word` if it follows as a whole identifier
    pub fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }
}

/// Identifier or number characters; a `/` right after them divides
fn ends_operand(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

fn closer_for(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}
