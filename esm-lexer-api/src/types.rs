//! API output types

use esm_lexer_config::OffsetEncoding;
use esm_lexer_core::SourceAnalysis;
use serde::Serialize;

/// Result of one scan
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    /// Records, with ranges in `encoding` units
    pub analysis: SourceAnalysis,
    pub encoding: OffsetEncoding,
    /// Source length in `encoding` units
    pub source_len: usize,
}

impl AnalysisOutput {
    pub fn import_count(&self) -> usize {
        self.analysis.imports().len()
    }

    pub fn export_count(&self) -> usize {
        self.analysis.exports().len()
    }
}
