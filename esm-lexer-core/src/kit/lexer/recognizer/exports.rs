//! `export` forms
//!
//! Only top-level exports are recognized. Names bound by a
//! `var`/`let`/`const` declaration are read one declarator at a time: the
//! first here, the rest by the tracker each time it meets a top-level `,`
//! while the declaration is open (see [`EsmScanner::continue_declaration`]).

use tracing::{debug, trace};

use super::{from_clause, read_name, FromClause};
use crate::kit::lexer::context::{Keyword, Token};
use crate::kit::lexer::core::Cursor;
use crate::kit::lexer::error::ErrorKind;
use crate::kit::lexer::tracker::EsmScanner;
use crate::module::{Export, Import, Range};

impl<'a> EsmScanner<'a> {
    /// Cursor just after an `export` keyword starting at `start`
    pub(crate) fn recognize_export(&mut self, start: usize) {
        if !self.frames.is_empty() {
            self.last = Token::Value;
            return;
        }
        self.declaration = false;
        self.conditional = 0;

        let mut look = self.cursor;
        look.skip_trivia();
        let recognized = match look.peek() {
            Some(b'{') => self.export_clause(look, start),
            Some(b'*') => self.export_star(look, start),
            _ => self.export_declaration(look),
        };
        if !recognized {
            debug!(target: "esm_lexer::recognizer", start, "Malformed export");
            self.report(ErrorKind::MalformedExport, start);
            self.last = Token::Value;
        }
    }

    /// `export { a, b as c } [from "x"]`
    fn export_clause(&mut self, mut c: Cursor<'a>, start: usize) -> bool {
        c.bump();
        let mut names = Vec::new();
        loop {
            c.skip_trivia();
            if c.match_byte(b'}') {
                break;
            }
            let Some(local) = read_name(&mut c) else {
                return false;
            };
            c.skip_trivia();
            let mut exported = local;
            if c.eat_word("as") {
                c.skip_trivia();
                match read_name(&mut c) {
                    Some(name) => exported = name,
                    None => return false,
                }
                c.skip_trivia();
            }
            names.push(exported);
            if !c.match_byte(b',') && !c.check(b'}') {
                return false;
            }
        }

        match from_clause(c, start) {
            FromClause::Absent => {}
            FromClause::Present(import, end) => {
                self.emitter.push_import(Import::Static(import));
                c = end;
            }
            FromClause::Malformed => return false,
        }
        trace!(target: "esm_lexer::recognizer", count = names.len(), "Export clause");
        for name in names {
            self.emitter.push_export(Export::new(name));
        }
        self.cursor = c;
        self.last = Token::Terminator;
        true
    }

    /// `export * from "x"` and `export * as ns from "x"`
    fn export_star(&mut self, mut c: Cursor<'a>, start: usize) -> bool {
        c.bump();
        c.skip_trivia();
        let mut namespace = None;
        if c.eat_word("as") {
            c.skip_trivia();
            namespace = read_name(&mut c);
            if namespace.is_none() {
                return false;
            }
        }
        let FromClause::Present(import, end) = from_clause(c, start) else {
            return false;
        };
        self.emitter.push_import(Import::Static(import));
        if let Some(name) = namespace {
            self.emitter.push_export(Export::new(name));
        }
        self.cursor = end;
        self.last = Token::Terminator;
        true
    }

    /// `export default`, `export var/let/const`, `export [async] function[*]`,
    /// `export class`
    fn export_declaration(&mut self, mut c: Cursor<'a>) -> bool {
        let Some(word) = c.read_identifier() else {
            return false;
        };
        match word.slice(self.source()) {
            "default" => {
                self.emitter.push_export(Export::new(word));
                self.cursor = c;
                self.last = Token::Keyword(Keyword::Expression);
                true
            }
            "var" | "let" | "const" => {
                let mut names = Vec::new();
                if !read_binding(&mut c, &mut names) {
                    return false;
                }
                self.emit_names(names);
                self.cursor = c;
                self.declaration = true;
                self.last = Token::Value;
                true
            }
            "async" => {
                c.skip_trivia();
                c.eat_word("function") && self.export_function(c)
            }
            "function" => self.export_function(c),
            "class" => {
                c.skip_trivia();
                let Some(name) = c.read_identifier() else {
                    return false;
                };
                self.emitter.push_export(Export::new(name));
                self.class_pending = Some(self.frames.len());
                self.cursor = c;
                self.last = Token::Value;
                true
            }
            _ => false,
        }
    }

    /// Cursor after `function`
    fn export_function(&mut self, mut c: Cursor<'a>) -> bool {
        c.skip_trivia();
        c.match_byte(b'*');
        c.skip_trivia();
        let Some(name) = c.read_identifier() else {
            return false;
        };
        self.emitter.push_export(Export::new(name));
        self.cursor = c;
        self.last = Token::Value;
        true
    }

    /// Top-level `,` inside an exported declaration: read the next declarator
    pub(crate) fn continue_declaration(&mut self) {
        let mut look = self.cursor;
        let mut names = Vec::new();
        if read_binding(&mut look, &mut names) {
            self.emit_names(names);
            self.cursor = look;
            self.last = Token::Value;
        } else {
            self.declaration = false;
        }
    }

    fn emit_names(&mut self, names: Vec<Range>) {
        for name in names {
            self.emitter.push_export(Export::new(name));
        }
    }
}

/// Binding identifier or destructuring pattern; collects every bound name
fn read_binding(c: &mut Cursor<'_>, names: &mut Vec<Range>) -> bool {
    c.skip_trivia();
    match c.peek() {
        Some(b'{') => read_object_pattern(c, names),
        Some(b'[') => read_array_pattern(c, names),
        _ => match c.read_identifier() {
            Some(name) => {
                names.push(name);
                true
            }
            None => false,
        },
    }
}

/// `{ a, b: c, "d": e, [k]: f, g = 1, ...h }`
fn read_object_pattern(c: &mut Cursor<'_>, names: &mut Vec<Range>) -> bool {
    c.bump();
    loop {
        c.skip_trivia();
        if c.match_byte(b'}') {
            return true;
        }
        if c.check_str("...") {
            c.bump_n(3);
            if !read_binding(c, names) {
                return false;
            }
        } else {
            let shorthand = match c.peek() {
                Some(q @ (b'"' | b'\'')) => {
                    if !c.skip_string(q) {
                        return false;
                    }
                    None
                }
                Some(b'[') => {
                    c.bump();
                    if !c.skip_balanced(b']') {
                        return false;
                    }
                    None
                }
                Some(b) if b.is_ascii_digit() => {
                    while c.peek().is_some_and(|b| b.is_ascii_alphanumeric() || b == b'.') {
                        c.bump();
                    }
                    None
                }
                _ => match c.read_identifier() {
                    Some(key) => Some(key),
                    None => return false,
                },
            };
            c.skip_trivia();
            if c.match_byte(b':') {
                if !read_binding(c, names) {
                    return false;
                }
            } else if let Some(name) = shorthand {
                names.push(name);
            } else {
                return false;
            }
        }
        if !skip_default(c) {
            return false;
        }
        c.skip_trivia();
        if !c.match_byte(b',') && !c.check(b'}') {
            return false;
        }
    }
}

/// `[a, , b = 1, [c], ...d]`
fn read_array_pattern(c: &mut Cursor<'_>, names: &mut Vec<Range>) -> bool {
    c.bump();
    loop {
        c.skip_trivia();
        if c.match_byte(b']') {
            return true;
        }
        if c.match_byte(b',') {
            continue;
        }
        if c.check_str("...") {
            c.bump_n(3);
        }
        if !read_binding(c, names) || !skip_default(c) {
            return false;
        }
        c.skip_trivia();
        if !c.match_byte(b',') && !c.check(b']') {
            return false;
        }
    }
}

/// `= expr` inside a pattern
fn skip_default(c: &mut Cursor<'_>) -> bool {
    let mut probe = *c;
    probe.skip_trivia();
    if probe.check(b'=') && probe.peek_at(1) != Some(b'=') {
        probe.bump();
        if !probe.skip_initializer() {
            return false;
        }
        *c = probe;
    }
    true
}
