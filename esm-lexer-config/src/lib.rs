//! ESM Lexer Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It is the shared configuration vocabulary of the scanner, the API layer
//! and the CLI. Every type deserializes from the `esm-lexer.json` project
//! file, with missing fields falling back to `Default`.

use serde::{Deserialize, Serialize};

/// Default upper bound on accepted source length (64 MiB).
pub const DEFAULT_MAX_SOURCE_LEN: usize = 64 * 1024 * 1024;

/// Unit in which emitted ranges are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetEncoding {
    /// UTF-8 byte offsets, valid for slicing the Rust `&str`
    #[default]
    Utf8,
    /// UTF-16 code unit offsets, valid for JavaScript strings
    Utf16,
}

/// Configuration for a single scan
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Inputs longer than this (in bytes) are rejected before scanning
    pub max_source_len: usize,
    /// Offset unit of the returned ranges
    pub offset_encoding: OffsetEncoding,
    /// Turn the first soft diagnostic into an error
    pub strict: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
            offset_encoding: OffsetEncoding::Utf8,
            strict: false,
        }
    }
}

/// Log verbosity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse a level name, case-insensitive. `silent` maps to `Error`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Global log level plus optional per-phase overrides
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub tracker: Option<LogLevel>,
    pub recognizer: Option<LogLevel>,
    pub emitter: Option<LogLevel>,
    pub api: Option<LogLevel>,
}

impl LoggingConfig {
    /// Effective level for a phase
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        let specific = match phase {
            Phase::Tracker => self.tracker,
            Phase::Recognizer => self.recognizer,
            Phase::Emitter => self.emitter,
            Phase::Api => self.api,
            Phase::Cli => None,
        };
        specific.unwrap_or(self.level)
    }
}

/// Output format of the CLI report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Contents of an `esm-lexer.json` project file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Files to scan, relative to the project file
    pub entries: Vec<String>,
    pub format: Option<OutputFormat>,
    pub lexer: LexerConfig,
    pub logging: LoggingConfig,
}

/// Pipeline phase, used for phase-specific log filtering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Tracker,
    Recognizer,
    Emitter,
    Api,
    Cli,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Tracker,
        Phase::Recognizer,
        Phase::Emitter,
        Phase::Api,
        Phase::Cli,
    ];

    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Tracker => "tracker",
            Phase::Recognizer => "recognizer",
            Phase::Emitter => "emitter",
            Phase::Api => "api",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> &'static str {
        match self {
            Phase::Tracker => "esm_lexer::tracker",
            Phase::Recognizer => "esm_lexer::recognizer",
            Phase::Emitter => "esm_lexer::emitter",
            Phase::Api => "esm_lexer::api",
            Phase::Cli => "esm_lexer::cli",
        }
    }
}
