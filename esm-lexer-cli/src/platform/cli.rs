//! Terminal output
//!
//! Text and JSON reports, plus errors printed with their source context.

use std::path::Path;

use esm_lexer_api::{
    source_lines, AnalysisOutput, Diagnostic, ErrorReport, EsmLexerError, Import, OffsetEncoding,
    Range,
};
use serde::Serialize;

/// Lines shown before and after an error line
const CONTEXT_LINES: usize = 5;

/// Print an error, with the offending source lines when it has a position
pub fn print_error_with_source(path: &Path, e: &EsmLexerError, source: Option<&str>) {
    eprintln!("error: {}: {}", path.display(), e);

    if let (Some(source), Some(line), Some(col)) = (source, e.line(), e.column()) {
        eprint!("{}", format_source_context(source, line, col));
    }
}

/// One-line warnings for soft diagnostics
pub fn print_diagnostics(path: &Path, source: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let position = diagnostic.position(source);
        eprintln!(
            "warning: {}:{}: {}",
            path.display(),
            position,
            diagnostic.kind
        );
    }
}

/// Source lines around `error_line`, with a `^` under `error_col`
pub fn format_source_context(source: &str, error_line: usize, error_col: usize) -> String {
    let lines = source_lines(source);
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return String::new();
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);
    let width = end_line.to_string().len();
    let separator = "-".repeat(width + 1);

    let mut out = format!("{}|--\n", separator);
    for line_idx in start_line..=end_line {
        out.push_str(&format!(
            "{:>width$} | {}\n",
            line_idx,
            lines[line_idx - 1],
            width = width
        ));
        if line_idx == error_line {
            out.push_str(&format!(
                "{} | {}^\n",
                " ".repeat(width),
                " ".repeat(error_col.saturating_sub(1))
            ));
        }
    }
    out.push_str(&format!("{}|--\n", separator));
    out
}

/// Text of `range` in whatever unit the output uses
fn snippet(source: &str, units: Option<&[u16]>, range: Range) -> String {
    match units {
        Some(units) => String::from_utf16_lossy(&units[range.start..range.end]),
        None => range.slice(source).to_string(),
    }
}

/// Human-readable listing of one file
pub fn render_text(path: &Path, source: &str, output: &AnalysisOutput) -> String {
    let units: Option<Vec<u16>> = match output.encoding {
        OffsetEncoding::Utf8 => None,
        OffsetEncoding::Utf16 => Some(source.encode_utf16().collect()),
    };
    let units = units.as_deref();
    let analysis = &output.analysis;

    let mut out = format!(
        "{} ({} imports, {} exports)\n",
        path.display(),
        analysis.imports().len(),
        analysis.exports().len()
    );
    for import in analysis.imports() {
        let range = import.range();
        let text = snippet(source, units, range);
        let specifier = match import {
            Import::Static(s) => Some(snippet(source, units, s.module_specifier_range())),
            Import::Dynamic(d) => d
                .module_specifier_expression_range()
                .map(|r| snippet(source, units, r)),
            Import::Meta(_) => None,
        };
        out.push_str(&format!(
            "  import {:<7} {:>6}..{:<6} {:?}",
            import.kind(),
            range.start,
            range.end,
            text
        ));
        if let Some(specifier) = specifier {
            out.push_str(&format!(" -> {}", specifier));
        }
        out.push('\n');
    }
    for export in analysis.exports() {
        let range = export.export_specifier_range();
        out.push_str(&format!(
            "  export {:<7} {:>6}..{:<6} {}\n",
            "",
            range.start,
            range.end,
            snippet(source, units, range)
        ));
    }
    out
}

/// One entry of the JSON report
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<&'a AnalysisOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

pub fn render_json(reports: &[FileReport<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use esm_lexer_api::{run, RunConfig};

    #[test]
    fn test_source_context_marker() {
        let source = "a\nbb\nccc";
        let out = format_source_context(source, 2, 2);
        assert_eq!(out, "--|--\n1 | a\n2 | bb\n  |  ^\n3 | ccc\n--|--\n");
    }

    #[test]
    fn test_source_context_mixed_line_ends() {
        let out = format_source_context("a\rbb\r\nccc", 2, 2);
        assert_eq!(out, "--|--\n1 | a\n2 | bb\n  |  ^\n3 | ccc\n--|--\n");
    }

    #[test]
    fn test_source_context_out_of_range() {
        assert_eq!(format_source_context("a", 0, 1), "");
        assert_eq!(format_source_context("a", 2, 1), "");
    }

    #[test]
    fn test_source_context_window() {
        let source: String = (1..=20).map(|i| format!("line{}\n", i)).collect();
        let out = format_source_context(&source, 10, 1);
        assert!(out.contains(" 5 | line5"));
        assert!(out.contains("15 | line15"));
        assert!(!out.contains("line4\n"));
        assert!(!out.contains("line16"));
    }

    #[test]
    fn test_render_text() {
        let source = "import { foo } from \"bar\";\nexport const baz = import.meta;";
        let output = run(source, &RunConfig::default()).unwrap();
        let text = render_text(Path::new("a.js"), source, &output);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "a.js (2 imports, 1 exports)");
        assert!(lines[1].contains("static"));
        assert!(lines[1].ends_with("\"import { foo } from \\\"bar\\\"\" -> bar"));
        assert!(lines[2].contains("meta"));
        assert!(lines[3].ends_with("baz"));
    }

    #[test]
    fn test_render_text_utf16() {
        let source = "'𓀀'; export let é = 1";
        let config = RunConfig::default().with_offset_encoding(OffsetEncoding::Utf16);
        let output = run(source, &config).unwrap();
        let text = render_text(Path::new("u.js"), source, &output);
        assert!(text.lines().nth(1).unwrap().ends_with(" é"));
    }

    #[test]
    fn test_render_json() {
        let source = "import('x')";
        let output = run(source, &RunConfig::default()).unwrap();
        let reports = [
            FileReport {
                file: "ok.js".to_string(),
                output: Some(&output),
                error: None,
            },
            FileReport {
                file: "big.js".to_string(),
                output: None,
                error: Some(EsmLexerError::InputTooLarge { len: 2, limit: 1 }.to_report()),
            },
        ];
        let json = render_json(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["output"]["analysis"]["imports"][0]["kind"], "dynamic");
        assert!(value[0].get("error").is_none());
        assert_eq!(value[1]["error"]["error_kind"], "InputTooLarge");
    }
}
