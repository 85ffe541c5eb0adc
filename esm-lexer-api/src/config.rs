//! API layer configuration
//!
//! `RunConfig` bundles the per-scan options with the logging setup, plus a
//! global singleton for the CLI.

use esm_lexer_config::{LexerConfig, LoggingConfig, OffsetEncoding, ProjectConfig};
use once_cell::sync::OnceCell;

/// Scan configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub lexer: LexerConfig,
    pub logging: LoggingConfig,
}

impl RunConfig {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.lexer.strict = strict;
        self
    }

    pub fn with_offset_encoding(mut self, encoding: OffsetEncoding) -> Self {
        self.lexer.offset_encoding = encoding;
        self
    }

    pub fn with_max_source_len(mut self, limit: usize) -> Self {
        self.lexer.max_source_len = limit;
        self
    }
}

impl From<&ProjectConfig> for RunConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            lexer: project.lexer.clone(),
            logging: project.logging.clone(),
        }
    }
}

static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration.
///
/// Returns the rejected config when one is already installed.
pub fn init(config: RunConfig) -> Result<(), RunConfig> {
    GLOBAL_CONFIG.set(config)
}

/// Global config, falling back to the default when never initialized
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}

pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use esm_lexer_config::{LogLevel, DEFAULT_MAX_SOURCE_LEN};

    #[test]
    fn test_default_run_config() {
        let cfg = RunConfig::default();
        assert!(!cfg.lexer.strict);
        assert_eq!(cfg.lexer.max_source_len, DEFAULT_MAX_SOURCE_LEN);
        assert_eq!(cfg.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_builders() {
        let cfg = RunConfig::default()
            .with_strict(true)
            .with_offset_encoding(OffsetEncoding::Utf16)
            .with_max_source_len(10);
        assert!(cfg.lexer.strict);
        assert_eq!(cfg.lexer.offset_encoding, OffsetEncoding::Utf16);
        assert_eq!(cfg.lexer.max_source_len, 10);
    }

    #[test]
    fn test_from_project_config() {
        let project = ProjectConfig {
            lexer: LexerConfig {
                strict: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let cfg = RunConfig::from(&project);
        assert!(cfg.lexer.strict);
    }

    #[test]
    fn test_global_config_init_once() {
        // Global state is shared across tests in this binary; only the
        // second `init` is guaranteed to be rejected.
        let _ = init(RunConfig::default());
        assert!(is_initialized());
        let rejected = init(RunConfig::default().with_strict(true));
        assert!(rejected.is_err());
        let _ = config();
    }
}
