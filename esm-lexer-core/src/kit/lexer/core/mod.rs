//! Cursor and position primitives

pub mod cursor;
pub mod position;

pub use cursor::{Cursor, Trivia};
pub use position::{source_lines, SourcePosition};
