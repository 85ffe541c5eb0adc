//! ESM Lexer Core - import/export scanner (pure logic, no IO)
//!
//! Finds the import and export constructs of an ECMAScript module with one
//! forward pass over the text, without building a syntax tree:
//!
//! ```
//! let source = "import { foo } from \"bar\";\nexport const baz = import.meta.url;";
//! let analysis = esm_lexer_core::parse(source);
//!
//! let import = analysis.imports()[0].as_static().unwrap();
//! assert_eq!(import.module_specifier(source), "bar");
//! assert_eq!(analysis.exports()[0].name(source), "baz");
//! assert!(analysis.imports()[1].as_meta().is_some());
//! ```
//!
//! All ranges are UTF-8 byte offsets; see [`SourceAnalysis::to_utf16`] for
//! hosts that index strings in UTF-16 units.

pub mod kit;
pub mod module;

pub use kit::lexer::{source_lines, Diagnostic, ErrorKind, LexerError, SourcePosition};
pub use module::{
    DynamicImport, Export, Import, ImportMeta, Range, SourceAnalysis, StaticImport, Utf16Index,
};

/// Scan module source. Never fails; problems are reported as diagnostics.
pub fn parse(source: &str) -> SourceAnalysis {
    kit::lexer::scan(source)
}

/// Scan module source, failing on the first diagnostic
pub fn parse_strict(source: &str) -> Result<SourceAnalysis, LexerError> {
    let analysis = parse(source);
    match analysis.first_error(source) {
        Some(err) => Err(err),
        None => Ok(analysis),
    }
}
