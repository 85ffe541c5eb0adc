//! Initialized scanner handle
//!
//! Hosts that load the scanner once and feed it many sources hold a
//! `ScannerHandle`; the handle owns its config and is cheap to share.

use tracing::debug;

use crate::config::RunConfig;
use crate::error::EsmLexerError;
use crate::types::AnalysisOutput;

#[derive(Debug, Clone)]
pub struct ScannerHandle {
    config: RunConfig,
}

/// Prepare a scanner for repeated use
pub fn initialize(config: RunConfig) -> ScannerHandle {
    debug!(target: "esm_lexer::api", ?config, "Scanner initialized");
    ScannerHandle { config }
}

impl ScannerHandle {
    pub fn parse(&self, source: &str) -> Result<AnalysisOutput, EsmLexerError> {
        crate::run(source, &self.config)
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}
