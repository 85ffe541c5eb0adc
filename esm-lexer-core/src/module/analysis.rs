//! Scan result and the emitter that builds it

use serde::Serialize;
use tracing::{debug, trace};

use super::range::Utf16Index;
use super::record::{Export, Import};
use crate::kit::lexer::{Diagnostic, LexerError};

/// Everything one scan found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceAnalysis {
    imports: Vec<Import>,
    exports: Vec<Export>,
    diagnostics: Vec<Diagnostic>,
}

impl SourceAnalysis {
    /// Imports ordered by the offset of their keyword
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Exported names in source order
    pub fn exports(&self) -> &[Export] {
        &self.exports
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// No diagnostics were recorded
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// First diagnostic as a positioned error
    pub fn first_error(&self, source: &str) -> Option<LexerError> {
        self.diagnostics.first().map(|d| d.into_error(source))
    }

    /// Same analysis with every range in UTF-16 code units
    ///
    /// Diagnostic offsets stay in bytes; they are rendered through
    /// `Diagnostic::position`, which reports both units.
    pub fn to_utf16(&self, source: &str) -> SourceAnalysis {
        let index = Utf16Index::new(source);
        if index.is_identity() {
            return self.clone();
        }
        SourceAnalysis {
            imports: self.imports.iter().map(|i| i.to_utf16(&index)).collect(),
            exports: self.exports.iter().map(|e| e.to_utf16(&index)).collect(),
            diagnostics: self.diagnostics.clone(),
        }
    }

    pub fn into_parts(self) -> (Vec<Import>, Vec<Export>, Vec<Diagnostic>) {
        (self.imports, self.exports, self.diagnostics)
    }
}

/// Append-only sink for records; dynamic imports are pushed when settled,
/// so imports are put in keyword order at the end.
#[derive(Debug, Default)]
pub(crate) struct Emitter {
    imports: Vec<Import>,
    exports: Vec<Export>,
    diagnostics: Vec<Diagnostic>,
}

impl Emitter {
    pub(crate) fn push_import(&mut self, import: Import) {
        trace!(target: "esm_lexer::emitter", kind = import.kind(), range = ?import.range(), "Emitting import");
        self.imports.push(import);
    }

    pub(crate) fn push_export(&mut self, export: Export) {
        trace!(target: "esm_lexer::emitter", range = ?export.export_specifier_range(), "Emitting export");
        self.exports.push(export);
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        debug!(target: "esm_lexer::emitter", kind = ?diagnostic.kind, offset = diagnostic.offset, "Diagnostic");
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn finish(mut self) -> SourceAnalysis {
        self.imports.sort_by_key(Import::start);
        self.diagnostics.sort_by_key(|d| d.offset);
        debug!(
            target: "esm_lexer::emitter",
            imports = self.imports.len(),
            exports = self.exports.len(),
            diagnostics = self.diagnostics.len(),
            "Scan finished"
        );
        SourceAnalysis {
            imports: self.imports,
            exports: self.exports,
            diagnostics: self.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::lexer::ErrorKind;
    use crate::module::{DynamicImport, ImportMeta, Range, StaticImport};

    #[test]
    fn test_finish_orders_imports_by_keyword() {
        let mut emitter = Emitter::default();
        emitter.push_import(Import::Meta(ImportMeta::new(Range::new(20, 31))));
        emitter.push_import(Import::Dynamic(DynamicImport::new(Range::new(5, 40), None)));
        emitter.push_import(Import::Static(StaticImport::new(
            Range::new(0, 4),
            Range::new(1, 2),
        )));
        let analysis = emitter.finish();
        let starts: Vec<usize> = analysis.imports().iter().map(Import::start).collect();
        assert_eq!(starts, vec![0, 5, 20]);
    }

    #[test]
    fn test_first_error() {
        let mut emitter = Emitter::default();
        emitter.report(Diagnostic::new(ErrorKind::UnterminatedComment, 2));
        let analysis = emitter.finish();
        assert!(!analysis.is_clean());
        let err = analysis.first_error("a /*").unwrap();
        assert_eq!(err.column(), 3);
    }
}
