//! DataFile terminal editor.

use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use datafile_cli::chooser::DialogFileChooser;
use datafile_cli::logging::{LogConfig, LogFormat, init_logging};
use datafile_cli::session::{Session, SessionConfig};
use datafile_cli::workspace::Workspace;
use datafile_report::{ReportConfig, default_renderers};

mod cli;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let report = ReportConfig {
        output_dir: cli.output_dir.clone(),
        open_browser: !cli.no_browser,
        ..ReportConfig::default()
    };
    let mut workspace = Workspace::new(default_renderers(&report));
    for path in &cli.files {
        workspace
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
    }

    let config = SessionConfig {
        app_name: cli.name.clone(),
        preview_rows: cli.preview_rows,
        ..SessionConfig::default()
    };
    let stdin = io::stdin();
    let mut session = Session::new(config, workspace, stdin.lock(), io::stdout());
    if !cli.no_dialog && DialogFileChooser::available() {
        session = session.with_chooser(Box::new(DialogFileChooser::new("Open a table")));
    }
    session.run().context("session ended unexpectedly")?;
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        log_cells: cli.log_cells,
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
