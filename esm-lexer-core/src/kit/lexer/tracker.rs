//! Lexical context tracker
//!
//! One forward pass over the source. The tracker skips strings, templates,
//! comments and regular expressions, keeps the bracket nesting on an
//! explicit frame stack, and remembers the last significant token so that
//! `/` and `{` can be classified without a parser. Identifiers named
//! `import` or `export` are handed to the recognizer (see
//! `recognizer/`), which looks ahead over the construct and either commits
//! the cursor past it or leaves it right after the keyword.

use tracing::{debug, trace};

use super::context::{keyword, BraceKind, Frame, FrameKind, Keyword, ParenKind, Token};
use super::core::Cursor;
use super::error::{Diagnostic, ErrorKind};
use crate::module::{DynamicImport, Emitter, Import, Range, SourceAnalysis};

pub struct EsmScanner<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) frames: Vec<Frame>,
    pub(crate) last: Token,
    /// A line terminator separates `last` from the current token
    pub(crate) newline_before: bool,
    /// Frame depth at which a `class` keyword still waits for its body
    pub(crate) class_pending: Option<usize>,
    /// Inside the declarator list of a top-level `export var/let/const`
    pub(crate) declaration: bool,
    /// Top-level `?` still waiting for the `:` of its conditional
    pub(crate) conditional: usize,
    /// `import(...)` whose `)` was seen; emitted unless `{` follows
    pub(crate) pending_call: Option<DynamicImport>,
    pub(crate) emitter: Emitter,
}

impl<'a> EsmScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            frames: Vec::new(),
            last: Token::Start,
            newline_before: false,
            class_pending: None,
            declaration: false,
            conditional: 0,
            pending_call: None,
            emitter: Emitter::default(),
        }
    }

    pub(crate) fn source(&self) -> &'a str {
        self.cursor.source()
    }

    pub(crate) fn report(&mut self, kind: ErrorKind, offset: usize) {
        self.emitter.report(Diagnostic::new(kind, offset));
    }

    /// Run the scan to completion
    pub fn scan(mut self) -> SourceAnalysis {
        debug!(target: "esm_lexer::tracker", len = self.source().len(), "Scanning module source");

        if self.cursor.check_str("#!") {
            self.cursor.skip_line();
        }

        loop {
            let trivia = self.cursor.skip_trivia();
            if let Some(at) = trivia.unterminated_comment {
                self.report(ErrorKind::UnterminatedComment, at);
            }
            self.newline_before = trivia.newline;

            let Some(b) = self.cursor.peek() else {
                break;
            };
            self.settle_pending_call(b);
            if self.ends_statement_by_asi(b) {
                if self.declaration {
                    trace!(target: "esm_lexer::tracker", offset = self.cursor.offset(), "Declaration ended by line break");
                }
                self.declaration = false;
                self.conditional = 0;
            }
            self.scan_token(b);
        }

        self.finish()
    }

    fn finish(mut self) -> SourceAnalysis {
        if let Some(call) = self.pending_call.take() {
            self.emitter.push_import(Import::Dynamic(call));
        }
        for frame in std::mem::take(&mut self.frames) {
            let kind = match frame.kind {
                FrameKind::Interpolation { template } => {
                    self.report(ErrorKind::UnterminatedTemplate, template);
                    continue;
                }
                kind => ErrorKind::UnclosedDelimiter(kind.opener()),
            };
            self.report(kind, frame.open);
        }
        self.emitter.finish()
    }

    /// Emit the pending `import(...)`, or drop it when `{` shows it was a
    /// method named `import`
    fn settle_pending_call(&mut self, next: u8) {
        if let Some(call) = self.pending_call.take() {
            if next == b'{' {
                trace!(target: "esm_lexer::tracker", range = ?call.import_expression_range(), "Discarding import() method definition");
            } else {
                self.emitter.push_import(Import::Dynamic(call));
            }
        }
    }

    /// A line break between a value and a value-starting token ends the
    /// top-level statement
    fn ends_statement_by_asi(&self, next: u8) -> bool {
        self.frames.is_empty()
            && self.newline_before
            && self.last.ends_value()
            && (self.cursor.at_identifier_start()
                || next.is_ascii_digit()
                || matches!(next, b'"' | b'\'' | b'`'))
    }

    fn scan_token(&mut self, b: u8) {
        match b {
            b'"' | b'\'' => {
                self.scan_string(b);
                self.last = Token::Value;
            }
            b'`' => {
                let start = self.cursor.offset();
                self.cursor.bump();
                self.scan_template_body(start);
            }
            b'/' => {
                if self.last.allows_regex() {
                    self.scan_regex();
                } else {
                    self.cursor.bump();
                    self.last = Token::Operator;
                }
            }
            b'(' => self.open_paren(),
            b')' => self.close_paren(),
            b'[' => {
                self.push_frame(FrameKind::Bracket);
                self.last = Token::Operator;
            }
            b']' => {
                self.close_frame(b']');
                self.last = Token::Value;
            }
            b'{' => self.open_brace(),
            b'}' => self.close_brace(),
            b';' => {
                self.cursor.bump();
                self.end_statement_part();
                if self.frames.is_empty() {
                    self.conditional = 0;
                }
                self.last = Token::Terminator;
            }
            b',' => {
                self.cursor.bump();
                self.last = Token::Operator;
                if self.class_pending == Some(self.frames.len()) {
                    self.class_pending = None;
                }
                if self.declaration && self.frames.is_empty() {
                    self.continue_declaration();
                }
            }
            b':' => {
                self.cursor.bump();
                if self.frames.is_empty() && self.conditional > 0 {
                    self.conditional -= 1;
                    self.last = Token::Operator;
                } else {
                    self.end_statement_part();
                    self.last = Token::Colon;
                }
            }
            b'.' => {
                if self.cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number();
                } else if self.cursor.check_str("...") {
                    self.cursor.bump_n(3);
                    self.last = Token::Operator;
                } else {
                    self.cursor.bump();
                    self.last = Token::Dot;
                }
            }
            b'?' => {
                let optional_chain = self.cursor.peek_at(1) == Some(b'.')
                    && !self.cursor.peek_at(2).is_some_and(|c| c.is_ascii_digit());
                if optional_chain {
                    self.cursor.bump_n(2);
                    self.last = Token::Dot;
                } else if self.cursor.peek_at(1) == Some(b'?') {
                    self.cursor.bump_n(2);
                    self.last = Token::Operator;
                } else {
                    if self.frames.is_empty() {
                        self.conditional += 1;
                    }
                    self.cursor.bump();
                    self.last = Token::Operator;
                }
            }
            b'=' if self.cursor.peek_at(1) == Some(b'>') => {
                self.cursor.bump_n(2);
                self.last = Token::Arrow;
            }
            b'+' | b'-' if self.cursor.peek_at(1) == Some(b) => {
                self.cursor.bump_n(2);
                // postfix after a value, prefix otherwise
                if !self.last.ends_value() {
                    self.last = Token::Operator;
                }
            }
            b'0'..=b'9' => self.scan_number(),
            b'#' => {
                self.cursor.bump();
                if self.cursor.read_identifier().is_some() {
                    self.last = Token::Value;
                } else {
                    self.last = Token::Operator;
                }
            }
            _ if self.cursor.at_identifier_start() => self.scan_word(),
            _ => {
                self.cursor.bump_char();
                self.last = Token::Operator;
            }
        }
    }

    /// `;` or `:` at the current depth
    fn end_statement_part(&mut self) {
        if self.frames.is_empty() {
            self.declaration = false;
        }
        if self.class_pending == Some(self.frames.len()) {
            self.class_pending = None;
        }
    }

    fn scan_string(&mut self, quote: u8) {
        let start = self.cursor.offset();
        if !self.cursor.skip_string(quote) {
            self.report(ErrorKind::UnterminatedString, start);
        }
    }

    /// Cursor just inside a template, after the backtick or after the `}`
    /// closing an interpolation
    fn scan_template_body(&mut self, template: usize) {
        loop {
            match self.cursor.peek() {
                None => {
                    self.report(ErrorKind::UnterminatedTemplate, template);
                    break;
                }
                Some(b'\\') => self.cursor.bump_n(2),
                Some(b'`') => {
                    self.cursor.bump();
                    break;
                }
                Some(b'$') if self.cursor.peek_at(1) == Some(b'{') => {
                    let open = self.cursor.offset();
                    self.cursor.bump_n(2);
                    self.frames.push(Frame {
                        kind: FrameKind::Interpolation { template },
                        open,
                    });
                    self.last = Token::Operator;
                    return;
                }
                Some(_) => self.cursor.bump(),
            }
        }
        self.last = Token::Value;
    }

    /// Regular expression literal. One that runs into a line terminator or
    /// end of input was a division after all; only the `/` is consumed.
    fn scan_regex(&mut self) {
        let start = self.cursor.offset();
        if self.cursor.skip_slash(true) {
            self.last = Token::Value;
        } else {
            trace!(target: "esm_lexer::tracker", offset = start, "Slash read as division");
            self.last = Token::Operator;
        }
    }

    fn scan_number(&mut self) {
        while self
            .cursor
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_' || c == b'.')
        {
            self.cursor.bump();
        }
        self.last = Token::Value;
    }

    fn scan_word(&mut self) {
        let Some(range) = self.cursor.read_identifier() else {
            self.cursor.bump_char();
            self.last = Token::Operator;
            return;
        };
        if self.last == Token::Dot {
            self.last = Token::Value;
            return;
        }
        match range.slice(self.source()) {
            "import" => self.recognize_import(range.start),
            "export" => self.recognize_export(range.start),
            word => match keyword(word) {
                Some(Keyword::Class) => {
                    self.class_pending = Some(self.frames.len());
                    self.last = Token::Keyword(Keyword::Class);
                }
                Some(kw) => self.last = Token::Keyword(kw),
                None => self.last = Token::Value,
            },
        }
    }

    fn push_frame(&mut self, kind: FrameKind) {
        let open = self.cursor.offset();
        self.cursor.bump();
        self.frames.push(Frame { kind, open });
    }

    /// Pop the innermost frame `closer` closes. Frames above it are
    /// abandoned; a closer with no opener is ignored.
    fn close_frame(&mut self, closer: u8) -> Option<FrameKind> {
        let at = self.cursor.offset();
        self.cursor.bump();
        let Some(i) = self.frames.iter().rposition(|f| f.kind.closed_by(closer)) else {
            self.report(ErrorKind::UnbalancedDelimiter(closer as char), at);
            return None;
        };
        if i + 1 != self.frames.len() {
            self.report(ErrorKind::UnbalancedDelimiter(closer as char), at);
            self.frames.truncate(i + 1);
        }
        let frame = self.frames.pop()?;
        if self.class_pending.is_some_and(|depth| depth > self.frames.len()) {
            self.class_pending = None;
        }
        Some(frame.kind)
    }

    fn open_paren(&mut self) {
        let kind = if self.last == Token::Keyword(Keyword::Control) {
            ParenKind::Control
        } else {
            ParenKind::Group
        };
        self.push_frame(FrameKind::Paren(kind));
        self.last = Token::Operator;
    }

    fn close_paren(&mut self) {
        self.last = match self.close_frame(b')') {
            Some(FrameKind::Paren(ParenKind::DynamicImport { start, specifier })) => {
                let range = Range::new(start, self.cursor.offset());
                self.pending_call = Some(DynamicImport::new(range, specifier));
                Token::CloseParen { control: false }
            }
            Some(FrameKind::Paren(ParenKind::Control)) => Token::CloseParen { control: true },
            _ => Token::CloseParen { control: false },
        };
    }

    fn open_brace(&mut self) {
        let kind = if self.class_pending == Some(self.frames.len()) {
            self.class_pending = None;
            BraceKind::Class
        } else {
            self.brace_kind()
        };
        self.push_frame(FrameKind::Brace(kind));
        self.last = Token::OpenBrace;
    }

    /// Block or object literal, decided by what precedes the `{`
    fn brace_kind(&self) -> BraceKind {
        let in_block = matches!(
            self.frames.last(),
            None | Some(Frame {
                kind: FrameKind::Brace(BraceKind::Block),
                ..
            })
        );
        match self.last {
            Token::Start
            | Token::Terminator
            | Token::Arrow
            | Token::CloseParen { .. }
            | Token::Keyword(Keyword::BlockOpener)
            | Token::CloseBrace(BraceKind::Block | BraceKind::Class) => BraceKind::Block,
            Token::OpenBrace | Token::Colon if in_block => BraceKind::Block,
            _ => BraceKind::Expression,
        }
    }

    fn close_brace(&mut self) {
        match self.close_frame(b'}') {
            Some(FrameKind::Interpolation { template }) => self.scan_template_body(template),
            Some(FrameKind::Brace(kind)) => self.last = Token::CloseBrace(kind),
            _ => self.last = Token::CloseBrace(BraceKind::Block),
        }
    }
}

/// Scan `source` for imports and exports
pub fn scan(source: &str) -> SourceAnalysis {
    EsmScanner::new(source).scan()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn slices(source: &str) -> Vec<String> {
        scan(source)
            .imports()
            .iter()
            .map(|i| i.range().slice(source).to_string())
            .collect()
    }

    #[test]
    fn test_strings_and_comments_hide_keywords() {
        let src = r#"
            const a = "import('x')";
            // import('y')
            /* export const z = 1 */
            const b = 'import.meta';
        "#;
        let analysis = scan(src);
        assert!(analysis.imports().is_empty());
        assert!(analysis.exports().is_empty());
        assert!(analysis.is_clean());
    }

    #[test]
    fn test_regex_containing_import() {
        let src = "const r = /import('x')/g;\nimport('y');";
        assert_eq!(slices(src), vec!["import('y')"]);
    }

    #[test]
    fn test_division_is_not_regex() {
        let src = "const x = a / 2; const y = b / import('z');";
        assert_eq!(slices(src), vec!["import('z')"]);
    }

    #[test]
    fn test_regex_after_control_paren() {
        let src = "if (x) /import('a')/.test(y)\nimport('b')";
        assert_eq!(slices(src), vec!["import('b')"]);
    }

    #[test]
    fn test_regex_after_block_brace() {
        let src = "function f() {}\n/import('a')/.exec(s); import('b')";
        assert_eq!(slices(src), vec!["import('b')"]);
    }

    #[test]
    fn test_division_after_object_literal() {
        let src = "x = ({}) / 1; y = {} / import('a') / 2";
        assert_eq!(slices(src), vec!["import('a')"]);
    }

    #[test]
    fn test_regex_with_slash_in_class() {
        let src = "const r = /[/]import('x')/;\nimport('y')";
        assert_eq!(slices(src), vec!["import('y')"]);
    }

    #[test]
    fn test_unterminated_regex_falls_back_to_division() {
        let src = "a = [\n/ 2]; import('x')";
        let analysis = scan(src);
        assert!(analysis.is_clean());
        assert_eq!(analysis.imports()[0].range().slice(src), "import('x')");
    }

    #[test]
    fn test_unterminated_regex_run_is_linear() {
        let src = "a=/[".repeat(50_000);
        let started = Instant::now();
        let analysis = scan(&src);
        assert!(analysis.imports().is_empty());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_regex_after_failed_line_is_read_again() {
        let src = "a = [\n/ 2];\nc = /import('x')/; import('y')";
        assert_eq!(slices(src), vec!["import('y')"]);
    }

    #[test]
    fn test_template_interpolation_with_braces() {
        let src = "const t = `a ${ {b: `c ${ import('inner') }`}.b } d`; import('outer')";
        assert_eq!(slices(src), vec!["import('inner')", "import('outer')"]);
    }

    #[test]
    fn test_template_text_is_not_code() {
        let src = "const t = `import('no') ${x} export { y }`;";
        let analysis = scan(src);
        assert!(analysis.imports().is_empty());
        assert!(analysis.exports().is_empty());
    }

    #[test]
    fn test_unterminated_template() {
        let src = "import('a'); const t = `abc ${x";
        let analysis = scan(src);
        assert_eq!(analysis.imports().len(), 1);
        assert_eq!(analysis.diagnostics()[0].kind, ErrorKind::UnterminatedTemplate);
    }

    #[test]
    fn test_unterminated_string_recovers_at_newline() {
        let src = "const s = 'oops\nimport('x')";
        let analysis = scan(src);
        assert_eq!(analysis.imports().len(), 1);
        assert_eq!(analysis.diagnostics()[0].kind, ErrorKind::UnterminatedString);
        assert_eq!(analysis.diagnostics()[0].offset, 10);
    }

    #[test]
    fn test_unterminated_comment() {
        let analysis = scan("import('a') /* never closed");
        assert_eq!(analysis.imports().len(), 1);
        assert_eq!(analysis.diagnostics()[0].kind, ErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_unbalanced_closer_is_ignored() {
        let analysis = scan("a) import('x')");
        assert_eq!(analysis.imports().len(), 1);
        assert_eq!(
            analysis.diagnostics()[0].kind,
            ErrorKind::UnbalancedDelimiter(')')
        );
    }

    #[test]
    fn test_unclosed_frame_reported() {
        let analysis = scan("function f() {");
        assert_eq!(
            analysis.diagnostics(),
            &[Diagnostic::new(ErrorKind::UnclosedDelimiter('{'), 13)]
        );
    }

    #[test]
    fn test_truncated_dynamic_import_is_dropped() {
        let analysis = scan("import('a'");
        assert!(analysis.imports().is_empty());
        assert_eq!(
            analysis.diagnostics()[0].kind,
            ErrorKind::UnclosedDelimiter('(')
        );
    }

    #[test]
    fn test_property_named_import() {
        let src = "obj.import('x'); obj?.export; a.import.meta";
        let analysis = scan(src);
        assert!(analysis.imports().is_empty());
        assert!(analysis.exports().is_empty());
    }

    #[test]
    fn test_hashbang() {
        let src = "#!/usr/bin/env node import('x')\nimport('y')";
        assert_eq!(slices(src), vec!["import('y')"]);
    }

    #[test]
    fn test_private_name_then_division() {
        let src = "class A { #x = 1; m() { return this.#x / 2 / import('a') } }";
        assert_eq!(slices(src), vec!["import('a')"]);
    }

    #[test]
    fn test_postfix_increment_then_division() {
        let src = "a++ / 2; b-- / import('x') / 1";
        assert_eq!(slices(src), vec!["import('x')"]);
    }
}
