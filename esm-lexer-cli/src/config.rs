//! CLI log configuration
//!
//! Maps the serializable `LoggingConfig` onto `tracing` levels and the
//! per-phase target filter.

use esm_lexer_config::{LogLevel, LoggingConfig, Phase};
use tracing::Level;
use tracing_subscriber::filter::Targets;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub tracker: Option<Level>,
    pub recognizer: Option<Level>,
    pub emitter: Option<Level>,
    pub api: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            tracker: None,
            recognizer: None,
            emitter: None,
            api: None,
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(cfg: &LoggingConfig) -> Self {
        Self {
            global: to_level(cfg.level),
            tracker: cfg.tracker.map(to_level),
            recognizer: cfg.recognizer.map(to_level),
            emitter: cfg.emitter.map(to_level),
            api: cfg.api.map(to_level),
        }
    }
}

impl LogConfig {
    /// Log level for a phase
    pub fn level_for(&self, phase: Phase) -> Level {
        let specific = match phase {
            Phase::Tracker => self.tracker,
            Phase::Recognizer => self.recognizer,
            Phase::Emitter => self.emitter,
            Phase::Api => self.api,
            Phase::Cli => None,
        };
        specific.unwrap_or(self.global)
    }

    /// Target filter with one entry per phase
    pub fn targets(&self) -> Targets {
        Phase::ALL
            .iter()
            .fold(Targets::new().with_default(self.global), |targets, &phase| {
                targets.with_target(phase.target(), self.level_for(phase))
            })
    }
}

pub fn to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_logging_config() {
        let cfg = LoggingConfig {
            level: LogLevel::Info,
            tracker: Some(LogLevel::Trace),
            ..Default::default()
        };
        let log = LogConfig::from(&cfg);
        assert_eq!(log.global, Level::INFO);
        assert_eq!(log.level_for(Phase::Tracker), Level::TRACE);
        assert_eq!(log.level_for(Phase::Emitter), Level::INFO);
        assert_eq!(log.level_for(Phase::Cli), Level::INFO);
    }

    #[test]
    fn test_targets_filter() {
        let log = LogConfig {
            recognizer: Some(Level::DEBUG),
            ..Default::default()
        };
        let targets = log.targets();
        assert!(targets.would_enable("esm_lexer::recognizer", &Level::DEBUG));
        assert!(!targets.would_enable("esm_lexer::tracker", &Level::DEBUG));
        assert!(targets.would_enable("esm_lexer::tracker", &Level::WARN));
    }
}
