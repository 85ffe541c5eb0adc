//! Import and export records
//!
//! Records are built once by the scanner and never mutated; fields are
//! private and read through accessors.

use serde::Serialize;

use super::range::{Range, Utf16Index};

/// `import ... from "x"`, `import "x"` or a re-export `export ... from "x"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaticImport {
    statement_range: Range,
    module_specifier_range: Range,
}

impl StaticImport {
    pub(crate) fn new(statement_range: Range, module_specifier_range: Range) -> Self {
        Self {
            statement_range,
            module_specifier_range,
        }
    }

    /// From the `import`/`export` keyword through the specifier string or
    /// the import attributes; a trailing `;` is not included
    pub fn statement_range(&self) -> Range {
        self.statement_range
    }

    /// Specifier text without its quotes
    pub fn module_specifier_range(&self) -> Range {
        self.module_specifier_range
    }

    pub fn module_specifier<'s>(&self, source: &'s str) -> &'s str {
        self.module_specifier_range.slice(source)
    }
}

/// `import(...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DynamicImport {
    import_expression_range: Range,
    module_specifier_expression_range: Option<Range>,
}

impl DynamicImport {
    pub(crate) fn new(import_expression_range: Range, specifier: Option<Range>) -> Self {
        Self {
            import_expression_range,
            module_specifier_expression_range: specifier,
        }
    }

    /// From `import` through the closing `)`
    pub fn import_expression_range(&self) -> Range {
        self.import_expression_range
    }

    /// The string literal argument including its quotes; `None` when the
    /// first argument is not a lone string literal
    pub fn module_specifier_expression_range(&self) -> Option<Range> {
        self.module_specifier_expression_range
    }

    /// Specifier text without quotes, when statically known
    pub fn module_specifier<'s>(&self, source: &'s str) -> Option<&'s str> {
        let r = self.module_specifier_expression_range?;
        Some(Range::new(r.start + 1, r.end - 1).slice(source))
    }
}

/// `import.meta`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportMeta {
    expression_range: Range,
}

impl ImportMeta {
    pub(crate) fn new(expression_range: Range) -> Self {
        Self { expression_range }
    }

    pub fn expression_range(&self) -> Range {
        self.expression_range
    }
}

/// One exported name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Export {
    export_specifier_range: Range,
}

impl Export {
    pub(crate) fn new(export_specifier_range: Range) -> Self {
        Self {
            export_specifier_range,
        }
    }

    /// The exported name; string names exclude their quotes
    pub fn export_specifier_range(&self) -> Range {
        self.export_specifier_range
    }

    pub fn name<'s>(&self, source: &'s str) -> &'s str {
        self.export_specifier_range.slice(source)
    }

    pub(crate) fn to_utf16(self, index: &Utf16Index) -> Self {
        Self::new(self.export_specifier_range.to_utf16(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Import {
    Static(StaticImport),
    Dynamic(DynamicImport),
    Meta(ImportMeta),
}

impl Import {
    /// Offset of the `import` (or `export`) keyword
    pub fn start(&self) -> usize {
        self.range().start
    }

    /// Whole construct: statement range or expression range
    pub fn range(&self) -> Range {
        match self {
            Import::Static(i) => i.statement_range,
            Import::Dynamic(i) => i.import_expression_range,
            Import::Meta(i) => i.expression_range,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Import::Static(_) => "static",
            Import::Dynamic(_) => "dynamic",
            Import::Meta(_) => "meta",
        }
    }

    pub fn as_static(&self) -> Option<&StaticImport> {
        match self {
            Import::Static(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_dynamic(&self) -> Option<&DynamicImport> {
        match self {
            Import::Dynamic(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_meta(&self) -> Option<&ImportMeta> {
        match self {
            Import::Meta(i) => Some(i),
            _ => None,
        }
    }

    pub(crate) fn to_utf16(self, index: &Utf16Index) -> Self {
        match self {
            Import::Static(i) => Import::Static(StaticImport::new(
                i.statement_range.to_utf16(index),
                i.module_specifier_range.to_utf16(index),
            )),
            Import::Dynamic(i) => Import::Dynamic(DynamicImport::new(
                i.import_expression_range.to_utf16(index),
                i.module_specifier_expression_range
                    .map(|r| r.to_utf16(index)),
            )),
            Import::Meta(i) => Import::Meta(ImportMeta::new(i.expression_range.to_utf16(index))),
        }
    }
}
