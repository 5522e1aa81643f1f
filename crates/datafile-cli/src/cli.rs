//! Command-line arguments for the `datafile` editor.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "datafile",
    version,
    about = "View and edit CSV and TSV tables from the terminal",
    long_about = "View and edit tabular data from delimited files.\n\n\
                  Open files, select one, then add, remove, change or search rows\n\
                  and display the result as text or as an HTML page."
)]
pub struct Cli {
    /// Files to open before the first prompt.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Application name shown when the session starts and ends.
    #[arg(long = "name", default_value = "DataFile")]
    pub name: String,

    /// Rows shown in table previews.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,

    /// Directory HTML displays are written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output_displays")]
    pub output_dir: PathBuf,

    /// Write HTML displays without opening a browser.
    #[arg(long = "no-browser")]
    pub no_browser: bool,

    /// Type file paths instead of using the native file dialog.
    #[arg(long = "no-dialog")]
    pub no_dialog: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in log records (redacted otherwise).
    #[arg(long = "log-cells")]
    pub log_cells: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
