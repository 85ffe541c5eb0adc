//! Construct recognizer
//!
//! Entered by the tracker on an `import` or `export` keyword. Every
//! recognizer works on a copy of the cursor; only a construct that parses
//! completely moves the shared cursor, otherwise scanning resumes right
//! after the keyword.

mod exports;
mod imports;

use super::core::Cursor;
use crate::module::{Range, StaticImport};

/// Quoted module specifier; returns the text between the quotes
fn read_module_string(c: &mut Cursor<'_>) -> Option<Range> {
    let quote = c.peek().filter(|&b| b == b'"' || b == b'\'')?;
    let open = c.offset();
    if !c.skip_string(quote) {
        return None;
    }
    Some(Range::new(open + 1, c.offset() - 1))
}

/// Binding or export name: an identifier, or a string (quotes excluded)
fn read_name(c: &mut Cursor<'_>) -> Option<Range> {
    match c.peek() {
        Some(b'"' | b'\'') => read_module_string(c),
        _ => c.read_identifier(),
    }
}

/// Cursor just after the specifier string. Extends the statement over an
/// import attributes clause (`with { ... }`, or `assert { ... }` on the same
/// line).
fn finish_static<'a>(c: Cursor<'a>, start: usize, specifier: Range) -> (StaticImport, Cursor<'a>) {
    let mut end = c;
    let mut probe = c;
    let trivia = probe.skip_trivia();
    if probe.eat_word("with") || (!trivia.newline && probe.eat_word("assert")) {
        probe.skip_trivia();
        if probe.match_byte(b'{') && probe.skip_balanced(b'}') {
            end = probe;
        }
    }
    let statement = Range::new(start, end.offset());
    (StaticImport::new(statement, specifier), end)
}

enum FromClause<'a> {
    Absent,
    Present(StaticImport, Cursor<'a>),
    Malformed,
}

/// Optional `from "x"` after an export clause
fn from_clause<'a>(c: Cursor<'a>, start: usize) -> FromClause<'a> {
    let mut probe = c;
    probe.skip_trivia();
    if !probe.eat_word("from") {
        return FromClause::Absent;
    }
    probe.skip_trivia();
    match read_module_string(&mut probe) {
        Some(specifier) => {
            let (import, end) = finish_static(probe, start, specifier);
            FromClause::Present(import, end)
        }
        None => FromClause::Malformed,
    }
}
