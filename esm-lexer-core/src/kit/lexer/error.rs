//! Lexer error types
//!
//! The scanner never fails: malformed input produces soft [`Diagnostic`]s
//! next to the records. [`LexerError`] is the hard form of a diagnostic,
//! used by strict parsing.

use serde::Serialize;
use thiserror::Error;

use super::core::SourcePosition;

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Quoted string cut off by a line terminator or end of input
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedComment,
    /// Closer with no matching opener, or closing across another frame
    UnbalancedDelimiter(char),
    /// Opener still open at end of input
    UnclosedDelimiter(char),
    /// `import` at top level that matches no import form
    MalformedImport,
    /// `export` at top level that matches no export form
    MalformedExport,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnterminatedString => write!(f, "Unterminated string literal"),
            ErrorKind::UnterminatedTemplate => write!(f, "Unterminated template literal"),
            ErrorKind::UnterminatedComment => write!(f, "Unterminated block comment"),
            ErrorKind::UnbalancedDelimiter(c) => write!(f, "Unbalanced '{}'", c),
            ErrorKind::UnclosedDelimiter(c) => write!(f, "Unclosed '{}'", c),
            ErrorKind::MalformedImport => write!(f, "Malformed import statement"),
            ErrorKind::MalformedExport => write!(f, "Malformed export statement"),
        }
    }
}

/// Soft diagnostic recorded while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    /// UTF-8 byte offset where the problem starts
    pub offset: usize,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn position(&self, source: &str) -> SourcePosition {
        SourcePosition::locate(source, self.offset)
    }

    pub fn into_error(self, source: &str) -> LexerError {
        LexerError::at(self.kind, self.position(source))
    }
}

/// Lexer error with structured position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}:{}] {}", .position.line, .position.column, .message)]
pub struct LexerError {
    pub kind: ErrorKind,
    pub position: SourcePosition,
    pub message: String,
}

impl LexerError {
    pub fn at(kind: ErrorKind, position: SourcePosition) -> Self {
        Self {
            kind,
            position,
            message: kind.to_string(),
        }
    }

    /// Line number (1-based)
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Column (1-based)
    pub fn column(&self) -> usize {
        self.position.column
    }
}
