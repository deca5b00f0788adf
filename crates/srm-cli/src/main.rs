//! Sheet record mapper CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use srm_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use srm_cli::commands::{MapOutcome, run_convert, run_inspect, run_map};
use srm_cli::logging::{LogConfig, LogFormat, init_logging};
use srm_cli::summary::{print_failures, print_preview};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Inspect(args) => match run_inspect(&args) {
            Ok(grid) => {
                print_preview(&grid, args.rows);
                0
            }
            Err(error) => report(&error),
        },
        Command::Convert(args) => match run_convert(&args) {
            Ok(grid) => {
                println!(
                    "Wrote {} row(s) to {}",
                    grid.height(),
                    args.output.display()
                );
                0
            }
            Err(error) => report(&error),
        },
        Command::Map(args) => match run_map(&args) {
            Ok(MapOutcome::Mapped {
                records,
                json,
                output,
            }) => {
                match output {
                    Some(path) => println!("Wrote {records} record(s) to {}", path.display()),
                    None => println!("{json}"),
                }
                0
            }
            Ok(MapOutcome::Failed { failures }) => {
                print_failures(&failures);
                1
            }
            Err(error) => report(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
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
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
