//! API error types
//!
//! One error type for every hard failure at the API boundary, plus a
//! structured report that the CLI prints and JSON consumers serialize.

use serde::Serialize;
use thiserror::Error;

/// Lexer error (strict mode), re-exported for convenience
pub use esm_lexer_core::LexerError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EsmLexerError {
    /// First diagnostic of a strict scan
    #[error("{0}")]
    Lexer(#[from] LexerError),

    #[error("Input too large: {len} bytes exceeds the limit of {limit}")]
    InputTooLarge { len: usize, limit: usize },

    #[error("Cannot read '{path}': {message}")]
    Io { path: String, message: String },
}

impl EsmLexerError {
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        EsmLexerError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Error line, if the error points into the source
    pub fn line(&self) -> Option<usize> {
        match self {
            EsmLexerError::Lexer(e) => Some(e.line()),
            _ => None,
        }
    }

    /// Error column, if the error points into the source
    pub fn column(&self) -> Option<usize> {
        match self {
            EsmLexerError::Lexer(e) => Some(e.column()),
            _ => None,
        }
    }

    pub fn phase(&self) -> &'static str {
        match self {
            EsmLexerError::Lexer(_) => "lexer",
            EsmLexerError::InputTooLarge { .. } => "api",
            EsmLexerError::Io { .. } => "io",
        }
    }

    /// Convert to a structured error report
    ///
    /// # Example
    /// ```
    /// use esm_lexer_api::{run, RunConfig};
    ///
    /// let config = RunConfig::default().with_strict(true);
    /// let err = run("const s = 'open", &config).unwrap_err();
    /// let report = err.to_report();
    /// assert_eq!(report.line, Some(1));
    /// println!("{}", report);
    /// ```
    pub fn to_report(&self) -> ErrorReport {
        match self {
            EsmLexerError::Lexer(e) => ErrorReport {
                phase: self.phase(),
                line: Some(e.line()),
                column: Some(e.column()),
                error_kind: format!("{:?}", e.kind),
                message: e.message.clone(),
                details: Some(ErrorDetails::Offset {
                    byte_offset: e.position.byte_offset,
                }),
            },
            EsmLexerError::InputTooLarge { len, limit } => ErrorReport {
                phase: self.phase(),
                line: None,
                column: None,
                error_kind: "InputTooLarge".to_string(),
                message: self.to_string(),
                details: Some(ErrorDetails::Limit {
                    len: *len,
                    limit: *limit,
                }),
            },
            EsmLexerError::Io { path, message } => ErrorReport {
                phase: self.phase(),
                line: None,
                column: None,
                error_kind: "Io".to_string(),
                message: message.clone(),
                details: Some(ErrorDetails::File { path: path.clone() }),
            },
        }
    }
}

/// Structured error report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// lexer, api or io
    pub phase: &'static str,
    /// 1-based line, if any
    pub line: Option<usize>,
    /// 1-based column, if any
    pub column: Option<usize>,
    pub error_kind: String,
    pub message: String,
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorDetails {
    Offset { byte_offset: usize },
    Limit { len: usize, limit: usize },
    File { path: String },
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "[{}:{}] {} error: {}", line, col, self.phase, self.message)
            }
            _ => write!(f, "[{}] {} error: {}", self.phase, self.phase, self.message),
        }
    }
}

impl ErrorReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Short form for terminals
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esm_lexer_core::{ErrorKind, SourcePosition};

    fn lexer_error() -> EsmLexerError {
        let pos = SourcePosition::new(3, 8, 50, 8);
        EsmLexerError::Lexer(LexerError::at(ErrorKind::UnterminatedString, pos))
    }

    #[test]
    fn test_lexer_error_line_column() {
        let err = lexer_error();
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.column(), Some(8));
        assert_eq!(err.phase(), "lexer");
    }

    #[test]
    fn test_lexer_error_to_report() {
        let report = lexer_error().to_report();
        assert_eq!(report.phase, "lexer");
        assert_eq!(report.error_kind, "UnterminatedString");
        assert_eq!(report.message, "Unterminated string literal");
        assert_eq!(report.details, Some(ErrorDetails::Offset { byte_offset: 50 }));
        assert_eq!(
            report.to_string(),
            "[3:8] lexer error: Unterminated string literal"
        );
    }

    #[test]
    fn test_input_too_large_report() {
        let err = EsmLexerError::InputTooLarge { len: 11, limit: 10 };
        assert_eq!(err.line(), None);
        let report = err.to_report();
        assert_eq!(report.phase, "api");
        assert_eq!(report.details, Some(ErrorDetails::Limit { len: 11, limit: 10 }));
        assert!(report.to_string().starts_with("[api] api error: Input too large"));
    }

    #[test]
    fn test_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = EsmLexerError::io("a.js", &io);
        assert_eq!(err.to_string(), "Cannot read 'a.js': missing");
        let report = err.to_report();
        assert_eq!(report.to_short(), "io: missing");
        assert_eq!(
            report.details,
            Some(ErrorDetails::File {
                path: "a.js".to_string()
            })
        );
    }

    #[test]
    fn test_error_report_to_json() {
        let json = lexer_error().to_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "lexer");
        assert_eq!(value["line"], 3);
        assert_eq!(value["details"]["type"], "offset");
        assert_eq!(value["details"]["byte_offset"], 50);
    }

    #[test]
    fn test_error_report_to_json_null_values() {
        let json = EsmLexerError::InputTooLarge { len: 2, limit: 1 }
            .to_report()
            .to_json()
            .unwrap();
        assert!(json.contains("\"line\":null"));
        assert!(json.contains("\"column\":null"));
    }

    #[test]
    fn test_json_escapes_message() {
        let report = ErrorReport {
            phase: "io",
            line: None,
            column: None,
            error_kind: "Io".to_string(),
            message: "line1\n\"quoted\"".to_string(),
            details: None,
        };
        let json = report.to_json().unwrap();
        assert!(json.contains("\\n"));
        assert!(json.contains("\\\"quoted\\\""));
    }
}
