//! Platform-specific output

pub mod cli;

pub use cli::{
    print_diagnostics, print_error_with_source, render_json, render_text, FileReport,
};
