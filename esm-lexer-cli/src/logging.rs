//! CLI logging setup
//!
//! `tracing-subscriber` registry filtered per phase. Logs go to stderr so
//! stdout stays reserved for the report.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::ValueEnum;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt, fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    Layer,
};

use crate::config::LogConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line colored output
    Pretty,
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Install the global subscriber, optionally mirroring logs to a file
pub fn init_with_file<P: AsRef<Path>>(
    log_config: &LogConfig,
    format: LogFormat,
    file: Option<P>,
) -> io::Result<()> {
    let targets = log_config.targets();
    let console = create_format_layer(format, io::stderr, true).with_filter(targets.clone());

    let result = match file {
        Some(path) => {
            let file_handle = OpenOptions::new().create(true).append(true).open(path)?;
            let file_layer =
                create_format_layer(format, Mutex::new(file_handle), false).with_filter(targets);
            tracing_subscriber::registry()
                .with(console)
                .with(file_layer)
                .try_init()
        }
        None => tracing_subscriber::registry().with(console).try_init(),
    };
    result.map_err(io::Error::other)
}

fn create_format_layer<S, W>(
    format: LogFormat,
    make_writer: W,
    ansi: bool,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_ansi(ansi)
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_ansi(ansi)
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}
