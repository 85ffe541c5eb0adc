//! Module-level results: ranges, import/export records, the analysis

pub mod analysis;
pub mod range;
pub mod record;

pub use analysis::SourceAnalysis;
pub(crate) use analysis::Emitter;
pub use range::{Range, Utf16Index};
pub use record::{DynamicImport, Export, Import, ImportMeta, StaticImport};
