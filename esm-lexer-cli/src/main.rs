//! ESM Lexer CLI - Command line interface
//!
//! Lists the imports and exports of JavaScript modules. Inputs come from
//! the command line and/or the `entries` of an `esm-lexer.json` project file.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};

mod config;
mod logging;
mod platform;

use crate::config::LogConfig;
use crate::logging::LogFormat;
use crate::platform::{
    print_diagnostics, print_error_with_source, render_json, render_text, FileReport,
};
use esm_lexer_api::{
    init_config, read_source, run, AnalysisOutput, EsmLexerError, LogLevel, OffsetEncoding,
    OutputFormat, ProjectConfig, RunConfig,
};

/// Project file looked up in the working directory when `--config` is absent
const DEFAULT_PROJECT_FILE: &str = "esm-lexer.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "esm-lexer",
    about = "List the imports and exports of ECMAScript modules",
    version
)]
struct Cli {
    /// Module files to scan
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Project file (default: ./esm-lexer.json when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Report ranges in UTF-16 code units
    #[arg(long)]
    utf16: bool,

    /// Fail a file on its first diagnostic
    #[arg(long)]
    strict: bool,

    /// silent, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Outcome of one input file
struct FileOutcome {
    path: PathBuf,
    source: Option<String>,
    result: Result<AnalysisOutput, EsmLexerError>,
}

fn main() {
    let cli = Cli::parse();

    let (project, base_dir) = match load_project(cli.config.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let run_config = match build_run_config(&project, &cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let log_config = LogConfig::from(&run_config.logging);
    if let Err(e) = logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_ref()) {
        eprintln!("Error: Cannot initialize logging: {}", e);
        process::exit(1);
    }

    // Global singleton for convenience
    let _ = init_config(run_config.clone());

    let inputs = collect_inputs(&project, &base_dir, &cli.files);
    if inputs.is_empty() {
        eprintln!(
            "Error: No input files\n\nPass module paths, or list them under 'entries' in '{}'",
            DEFAULT_PROJECT_FILE
        );
        process::exit(1);
    }
    info!(target: "esm_lexer::cli", files = inputs.len(), "Scanning");

    let outcomes: Vec<FileOutcome> = inputs
        .into_iter()
        .map(|path| scan_file(path, &run_config))
        .collect();

    let format = cli
        .format
        .map(OutputFormat::from)
        .or(project.format)
        .unwrap_or_default();
    let failed = match format {
        OutputFormat::Text => report_text(&outcomes),
        OutputFormat::Json => report_json(&outcomes),
    };

    if failed {
        process::exit(1);
    }
}

/// Read the project file, returning it with the directory entries resolve against
fn load_project(explicit: Option<&Path>) -> Result<(ProjectConfig, PathBuf), String> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_PROJECT_FILE);
            if !default.exists() {
                return Ok((ProjectConfig::default(), PathBuf::from(".")));
            }
            default
        }
    };
    let project = read_project(path)?;
    let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    Ok((project, base_dir))
}

fn read_project(path: &Path) -> Result<ProjectConfig, String> {
    if !path.exists() {
        return Err(format!("Project file '{}' not found", path.display()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;
    parse_project(&content).map_err(|e| format!("Cannot parse '{}': {}", path.display(), e))
}

fn parse_project(content: &str) -> serde_json::Result<ProjectConfig> {
    serde_json::from_str(content)
}

/// Project settings with command line flags applied on top
fn build_run_config(project: &ProjectConfig, cli: &Cli) -> Result<RunConfig, String> {
    let mut config = RunConfig::from(project);
    if cli.strict {
        config.lexer.strict = true;
    }
    if cli.utf16 {
        config.lexer.offset_encoding = OffsetEncoding::Utf16;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level =
            LogLevel::parse(level).ok_or_else(|| format!("Unknown log level '{}'", level))?;
    }
    Ok(config)
}

/// Project entries (relative to the project file) followed by explicit files
fn collect_inputs(project: &ProjectConfig, base_dir: &Path, files: &[PathBuf]) -> Vec<PathBuf> {
    project
        .entries
        .iter()
        .map(|entry| base_dir.join(entry))
        .chain(files.iter().cloned())
        .collect()
}

fn scan_file(path: PathBuf, config: &RunConfig) -> FileOutcome {
    debug!(target: "esm_lexer::cli", path = %path.display(), "Reading");
    match read_source(&path) {
        Ok(source) => {
            let result = run(&source, config);
            FileOutcome {
                path,
                source: Some(source),
                result,
            }
        }
        Err(e) => FileOutcome {
            path,
            source: None,
            result: Err(e),
        },
    }
}

/// Print text reports; returns whether any file failed
fn report_text(outcomes: &[FileOutcome]) -> bool {
    let mut failed = false;
    for outcome in outcomes {
        match (&outcome.result, &outcome.source) {
            (Ok(output), Some(source)) => {
                print!("{}", render_text(&outcome.path, source, output));
                print_diagnostics(&outcome.path, source, output.analysis.diagnostics());
            }
            (Ok(_), None) => {}
            (Err(e), source) => {
                print_error_with_source(&outcome.path, e, source.as_deref());
                failed = true;
            }
        }
    }
    failed
}

/// Print one JSON document for all files; returns whether any file failed
fn report_json(outcomes: &[FileOutcome]) -> bool {
    let reports: Vec<FileReport<'_>> = outcomes
        .iter()
        .map(|outcome| FileReport {
            file: outcome.path.display().to_string(),
            output: outcome.result.as_ref().ok(),
            error: outcome.result.as_ref().err().map(EsmLexerError::to_report),
        })
        .collect();
    let failed = reports.iter().any(|r| r.error.is_some());
    match render_json(&reports) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Cannot serialize report: {}", e);
            return true;
        }
    }
    failed
}
