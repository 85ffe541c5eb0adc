//! Test helpers
//!
//! Turn an analysis into the substrings its ranges cover, so tests can
//! compare text instead of offsets.

#![allow(dead_code)]

use esm_lexer_core::{parse, Import, SourceAnalysis};

/// Substring of every import's statement/expression range, in order
pub fn import_texts(source: &str) -> Vec<String> {
    import_texts_of(&parse(source), source)
}

pub fn import_texts_of(analysis: &SourceAnalysis, source: &str) -> Vec<String> {
    analysis
        .imports()
        .iter()
        .map(|i| i.range().slice(source).to_string())
        .collect()
}

/// Exported names, in order
pub fn export_names(source: &str) -> Vec<String> {
    parse(source)
        .exports()
        .iter()
        .map(|e| e.name(source).to_string())
        .collect()
}

/// Module specifiers: static without quotes, dynamic with quotes
/// (`None` when not statically known), `import.meta` as `None`
pub fn specifiers(source: &str) -> Vec<Option<String>> {
    parse(source)
        .imports()
        .iter()
        .map(|i| match i {
            Import::Static(s) => Some(s.module_specifier(source).to_string()),
            Import::Dynamic(d) => d
                .module_specifier_expression_range()
                .map(|r| r.slice(source).to_string()),
            Import::Meta(_) => None,
        })
        .collect()
}

/// Every range of every record lies inside `source` on char boundaries
pub fn assert_ranges_valid(analysis: &SourceAnalysis, source: &str) {
    let check = |start: usize, end: usize| {
        assert!(start <= end && end <= source.len(), "range {start}..{end} out of bounds");
        assert!(source.is_char_boundary(start) && source.is_char_boundary(end));
    };
    for import in analysis.imports() {
        let r = import.range();
        check(r.start, r.end);
        match import {
            Import::Static(s) => {
                let spec = s.module_specifier_range();
                check(spec.start, spec.end);
                assert!(r.start <= spec.start && spec.end <= r.end);
            }
            Import::Dynamic(d) => {
                if let Some(spec) = d.module_specifier_expression_range() {
                    check(spec.start, spec.end);
                    assert!(r.start <= spec.start && spec.end <= r.end);
                }
            }
            Import::Meta(_) => {}
        }
    }
    for export in analysis.exports() {
        let r = export.export_specifier_range();
        check(r.start, r.end);
    }
    let starts: Vec<usize> = analysis.imports().iter().map(Import::start).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]), "imports out of order");
}
