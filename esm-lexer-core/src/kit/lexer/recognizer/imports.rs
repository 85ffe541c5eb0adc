//! `import` forms: static declarations, `import(...)` and `import.meta`

use tracing::{debug, trace};

use super::{finish_static, read_module_string, read_name};
use crate::kit::lexer::context::{Frame, FrameKind, ParenKind, Token};
use crate::kit::lexer::core::Cursor;
use crate::kit::lexer::error::ErrorKind;
use crate::kit::lexer::tracker::EsmScanner;
use crate::module::{Import, ImportMeta, Range, StaticImport};

impl<'a> EsmScanner<'a> {
    /// Cursor just after an `import` keyword starting at `start`
    pub(crate) fn recognize_import(&mut self, start: usize) {
        let mut look = self.cursor;
        look.skip_trivia();

        match look.peek() {
            Some(b'(') => {
                let open = look.offset();
                look.bump();
                let specifier = dynamic_specifier(look);
                trace!(target: "esm_lexer::recognizer", start, ?specifier, "Dynamic import");
                self.cursor = look;
                self.frames.push(Frame {
                    kind: FrameKind::Paren(ParenKind::DynamicImport { start, specifier }),
                    open,
                });
                self.last = Token::Operator;
            }
            Some(b'.') => {
                look.bump();
                look.skip_trivia();
                if look.eat_word("meta") {
                    let range = Range::new(start, look.offset());
                    self.emitter.push_import(Import::Meta(ImportMeta::new(range)));
                    self.cursor = look;
                }
                self.last = Token::Value;
            }
            _ if self.frames.is_empty() => match static_import(look, start) {
                Some((import, end)) => {
                    debug!(
                        target: "esm_lexer::recognizer",
                        specifier = import.module_specifier(self.source()),
                        "Static import"
                    );
                    self.emitter.push_import(Import::Static(import));
                    self.cursor = end;
                    self.declaration = false;
                    self.conditional = 0;
                    self.last = Token::Terminator;
                }
                None => {
                    debug!(target: "esm_lexer::recognizer", start, "Malformed import");
                    self.report(ErrorKind::MalformedImport, start);
                    self.last = Token::Value;
                }
            },
            _ => self.last = Token::Value,
        }
    }
}

/// Cursor just inside `import(`. The specifier is known only when the first
/// argument is a lone string literal.
fn dynamic_specifier(mut c: Cursor<'_>) -> Option<Range> {
    c.skip_trivia();
    let quote = c.peek().filter(|&b| b == b'"' || b == b'\'')?;
    let open = c.offset();
    if !c.skip_string(quote) {
        return None;
    }
    let literal = Range::new(open, c.offset());
    c.skip_trivia();
    matches!(c.peek(), Some(b')' | b',')).then_some(literal)
}

/// Static import declaration; `c` is past the keyword and its trivia
fn static_import<'a>(mut c: Cursor<'a>, start: usize) -> Option<(StaticImport, Cursor<'a>)> {
    if let Some(specifier) = read_module_string(&mut c) {
        return Some(finish_static(c, start, specifier));
    }

    skip_phase_modifier(&mut c);
    match c.peek()? {
        b'{' => named_imports(&mut c)?,
        b'*' => namespace_import(&mut c)?,
        _ => {
            c.read_identifier()?;
            c.skip_trivia();
            if c.match_byte(b',') {
                c.skip_trivia();
                match c.peek()? {
                    b'{' => named_imports(&mut c)?,
                    b'*' => namespace_import(&mut c)?,
                    _ => return None,
                }
            }
        }
    }

    c.skip_trivia();
    if !c.eat_word("from") {
        return None;
    }
    c.skip_trivia();
    let specifier = read_module_string(&mut c)?;
    Some(finish_static(c, start, specifier))
}

/// `defer` / `source` phase keyword, unless it is itself the default binding
fn skip_phase_modifier(c: &mut Cursor<'_>) {
    for word in ["defer", "source"] {
        let mut probe = *c;
        if probe.eat_word(word) {
            probe.skip_trivia();
            if probe.check(b'*') || (probe.at_identifier_start() && !probe.check_word("from")) {
                *c = probe;
            }
            return;
        }
    }
}

/// `{ a, b as c, "d-e" as f }`
fn named_imports(c: &mut Cursor<'_>) -> Option<()> {
    c.bump();
    loop {
        c.skip_trivia();
        if c.match_byte(b'}') {
            return Some(());
        }
        read_name(c)?;
        c.skip_trivia();
        if c.eat_word("as") {
            c.skip_trivia();
            c.read_identifier()?;
            c.skip_trivia();
        }
        if !c.match_byte(b',') && !c.check(b'}') {
            return None;
        }
    }
}

/// `* as ns`
fn namespace_import(c: &mut Cursor<'_>) -> Option<()> {
    c.bump();
    c.skip_trivia();
    if !c.eat_word("as") {
        return None;
    }
    c.skip_trivia();
    c.read_identifier().map(|_| ())
}

#[cfg(test)]
mod tests {
    use crate::kit::lexer::tracker::scan;
    use crate::kit::lexer::ErrorKind;

    fn statics(source: &str) -> Vec<(&str, &str)> {
        scan(source)
            .imports()
            .iter()
            .filter_map(|i| i.as_static().copied())
            .map(|i| (i.statement_range().slice(source), i.module_specifier(source)))
            .collect()
    }

    #[test]
    fn test_static_import_forms() {
        let src = r#"
import "side-effect";
import def from 'a';
import * as ns from "b";
import { x, y as z, "str-name" as w } from "c";
import d2, { e } from "d";
import d3, * as ns2 from "e";
import {} from "f";
"#;
        assert_eq!(
            statics(src),
            vec![
                (r#"import "side-effect""#, "side-effect"),
                ("import def from 'a'", "a"),
                (r#"import * as ns from "b""#, "b"),
                (r#"import { x, y as z, "str-name" as w } from "c""#, "c"),
                (r#"import d2, { e } from "d""#, "d"),
                (r#"import d3, * as ns2 from "e""#, "e"),
                (r#"import {} from "f""#, "f"),
            ]
        );
    }

    #[test]
    fn test_minified_imports() {
        let src = r#"import{a}from"a";import*as b from"b";import c from"c";import"d""#;
        let specifiers: Vec<&str> = statics(src).into_iter().map(|(_, s)| s).collect();
        assert_eq!(specifiers, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_import_attributes_extend_statement() {
        let src = "import data from './data.json' with { type: 'json' };\nimport x from 'x' assert { type: \"css\" }";
        assert_eq!(
            statics(src),
            vec![
                ("import data from './data.json' with { type: 'json' }", "./data.json"),
                ("import x from 'x' assert { type: \"css\" }", "x"),
            ]
        );
    }

    #[test]
    fn test_phase_modifiers() {
        let src = "import defer * as ns from 'a';\nimport source wasm from 'b.wasm';\nimport defer from 'c';";
        let specifiers: Vec<&str> = statics(src).into_iter().map(|(_, s)| s).collect();
        assert_eq!(specifiers, vec!["a", "b.wasm", "c"]);
    }

    #[test]
    fn test_binding_named_from() {
        let src = "import from from 'from';";
        assert_eq!(statics(src), vec![("import from from 'from'", "from")]);
    }

    #[test]
    fn test_malformed_import_reports_and_continues() {
        let src = "import { a from 'x';\nimport('y')";
        let analysis = scan(src);
        assert_eq!(analysis.diagnostics()[0].kind, ErrorKind::MalformedImport);
        assert_eq!(analysis.diagnostics()[0].offset, 0);
        assert_eq!(analysis.imports().len(), 1);
        assert!(analysis.imports()[0].as_dynamic().is_some());
    }

    #[test]
    fn test_static_import_only_at_top_level() {
        let src = "function f() { import x from 'x' }";
        let analysis = scan(src);
        assert!(analysis.imports().is_empty());
    }

    #[test]
    fn test_import_meta_across_newline() {
        let src = "import.\n meta.url; import /* c */ . meta";
        let analysis = scan(src);
        let ranges: Vec<&str> = analysis
            .imports()
            .iter()
            .map(|i| i.as_meta().unwrap().expression_range().slice(src))
            .collect();
        assert_eq!(ranges, vec!["import.\n meta", "import /* c */ . meta"]);
    }

    #[test]
    fn test_import_meta_word_boundary() {
        let analysis = scan("import.metadata");
        assert!(analysis.imports().is_empty());
    }

    #[test]
    fn test_dynamic_import_specifiers() {
        let src = "import('a'); import(\"b\", { with: { type: 'json' } }); import(`c`); import('d' + e); import( /* x */ 'f' /* y */ )";
        let analysis = scan(src);
        let found: Vec<(&str, Option<&str>)> = analysis
            .imports()
            .iter()
            .map(|i| {
                let d = i.as_dynamic().unwrap();
                (
                    d.import_expression_range().slice(src),
                    d.module_specifier_expression_range().map(|r| r.slice(src)),
                )
            })
            .collect();
        assert_eq!(
            found,
            vec![
                ("import('a')", Some("'a'")),
                ("import(\"b\", { with: { type: 'json' } })", Some("\"b\"")),
                ("import(`c`)", None),
                ("import('d' + e)", None),
                ("import( /* x */ 'f' /* y */ )", Some("'f'")),
            ]
        );
    }

    #[test]
    fn test_nested_dynamic_imports_ordered_by_keyword() {
        let src = "import(import('inner'))";
        let analysis = scan(src);
        let ranges: Vec<&str> = analysis.imports().iter().map(|i| i.range().slice(src)).collect();
        assert_eq!(ranges, vec!["import(import('inner'))", "import('inner')"]);
    }

    #[test]
    fn test_import_method_definition_discarded() {
        let src = "const o = { import() {} };\nclass A { import(a) { return a } }\nimport('real')";
        let analysis = scan(src);
        let ranges: Vec<&str> = analysis.imports().iter().map(|i| i.range().slice(src)).collect();
        assert_eq!(ranges, vec!["import('real')"]);
    }

    #[test]
    fn test_dynamic_import_then_chain() {
        let src = "import('a').then(m => m.default)";
        let analysis = scan(src);
        assert_eq!(analysis.imports()[0].range().slice(src), "import('a')");
    }
}
