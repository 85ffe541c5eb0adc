//! ESM Lexer API - scan orchestration layer
//!
//! Wraps the core scanner with:
//! - Input limits and strict mode (RunConfig)
//! - Offset-encoding conversion (UTF-8 or UTF-16 ranges)
//! - Unified error handling (EsmLexerError, ErrorReport)
//!
//! Library users should call `run(source, &config)` or hold a
//! [`ScannerHandle`]. The global config is a convenience for the CLI.

use std::path::Path;

use tracing::{debug, info, warn};

pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};

pub use esm_lexer_config::{
    LexerConfig, LogLevel, LoggingConfig, OffsetEncoding, OutputFormat, Phase, ProjectConfig,
};

pub mod error;
pub mod handle;
pub mod types;
pub use error::{ErrorDetails, ErrorReport, EsmLexerError, LexerError};
pub use handle::{initialize, ScannerHandle};
pub use types::AnalysisOutput;

pub use esm_lexer_core::{
    parse, parse_strict, source_lines, Diagnostic, DynamicImport, ErrorKind, Export, Import,
    ImportMeta, Range, SourceAnalysis, SourcePosition, StaticImport, Utf16Index,
};

/// Scan with explicit configuration
pub fn run(source: &str, config: &RunConfig) -> Result<AnalysisOutput, EsmLexerError> {
    let limit = config.lexer.max_source_len;
    if source.len() > limit {
        warn!(target: "esm_lexer::api", len = source.len(), limit, "Input rejected");
        return Err(EsmLexerError::InputTooLarge {
            len: source.len(),
            limit,
        });
    }

    debug!(
        target: "esm_lexer::api",
        len = source.len(),
        strict = config.lexer.strict,
        encoding = ?config.lexer.offset_encoding,
        "Starting scan"
    );

    let analysis = if config.lexer.strict {
        parse_strict(source)?
    } else {
        parse(source)
    };

    let (analysis, source_len) = match config.lexer.offset_encoding {
        OffsetEncoding::Utf8 => (analysis, source.len()),
        OffsetEncoding::Utf16 => (analysis.to_utf16(source), source.encode_utf16().count()),
    };

    info!(
        target: "esm_lexer::api",
        imports = analysis.imports().len(),
        exports = analysis.exports().len(),
        diagnostics = analysis.diagnostics().len(),
        "Scan completed"
    );

    Ok(AnalysisOutput {
        analysis,
        encoding: config.lexer.offset_encoding,
        source_len,
    })
}

/// Read a source file as UTF-8
pub fn read_source(path: impl AsRef<Path>) -> Result<String, EsmLexerError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| EsmLexerError::io(path.display().to_string(), &e))
}

/// Scan using the global config (auto-initializes with defaults)
pub fn quick_analyze(source: &str) -> Result<AnalysisOutput, EsmLexerError> {
    if !is_initialized() {
        // Losing a race to another initializer is fine
        let _ = init_config(RunConfig::default());
    }
    run(source, get_config())
}
