//! Source position tracking
//!
//! Several coordinate systems for different consumers:
//! - line/column: human readable error display (1-based)
//! - byte_offset: slicing the Rust `&str` (0-based)
//! - utf16_column: LSP-style `Position.character` (0-based, UTF-16 units)

use serde::Serialize;

use crate::kit::lexer::chars::is_line_terminator;

/// Source position
///
/// Computed on demand from a byte offset; the scanner itself only tracks
/// byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourcePosition {
    /// Line number, 1-based
    pub line: usize,
    /// Column, 1-based, counted in Unicode scalar values
    pub column: usize,
    /// Byte offset, 0-based, UTF-8
    pub byte_offset: usize,
    /// Offset inside the line in UTF-16 units, 0-based
    pub utf16_column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, byte_offset: usize, utf16_column: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
            utf16_column,
        }
    }

    /// Start of file
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            byte_offset: 0,
            utf16_column: 0,
        }
    }

    /// Advance over one character. A `\r\n` pair takes two calls and
    /// counts as two lines here; `locate` folds it into one.
    pub fn advance(&mut self, c: char) {
        if is_line_terminator(c) {
            self.line += 1;
            self.column = 1;
            self.utf16_column = 0;
        } else {
            self.column += 1;
            self.utf16_column += c.len_utf16();
        }
        self.byte_offset += c.len_utf8();
    }

    /// Position of `offset` inside `source`
    ///
    /// Offsets past the end clamp to the end of input; offsets inside a
    /// multi-byte character resolve to the start of that character.
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut pos = Self::start();
        let mut prev = None;
        for c in source.chars() {
            if pos.byte_offset + c.len_utf8() > offset {
                break;
            }
            if c == '\n' && prev == Some('\r') {
                pos.byte_offset += 1;
            } else {
                pos.advance(c);
            }
            prev = Some(c);
        }
        pos
    }
}

/// Split `source` into lines at every line terminator, `\r\n` counting
/// as one. Lines are numbered the way [`SourcePosition::locate`] numbers
/// them; a trailing terminator does not open an empty last line.
pub fn source_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_terminator(c) {
            continue;
        }
        lines.push(&source[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            start += 1;
        }
    }
    if start < source.len() {
        lines.push(&source[start..]);
    }
    lines
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
