//! ESM lexer
//!
//! Single forward pass, no token stream and no syntax tree:
//! - `tracker`: strings, templates, comments, regex, nesting
//! - `recognizer`: import/export constructs at the keyword
//! - `crate::module`: ranges and records the scan emits

pub mod chars;
pub(crate) mod context;
pub mod core;
pub mod error;
mod recognizer;
pub mod tracker;

pub use self::core::{source_lines, Cursor, SourcePosition, Trivia};
pub use error::{Diagnostic, ErrorKind, LexerError};
pub use tracker::{scan, EsmScanner};
