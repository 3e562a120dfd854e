//! School climate survey CLI.

use clap::{ColorChoice, Parser};
use elev_cli::logging::{LogConfig, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_rows, run_summary, run_trend, run_years};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Years(args) => run_years(&cli.source, args.json).await,
        Command::Summary(args) => run_summary(&cli.source, args).await,
        Command::Trend(args) => run_trend(&cli.source, args).await,
        Command::Rows(args) => run_rows(&cli.source, args).await,
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Flags first; `RUST_LOG` only applies when no level flag was given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        ..LogConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn explicit_level_disables_env_filter() {
        let cli = Cli::parse_from(["elev", "--log-level", "debug", "years"]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn summary_parses_model_values() {
        let cli = Cli::parse_from([
            "elev", "summary", "--year", "20232024", "--trinn", "vg2", "--compare", "974557746",
            "--offline",
        ]);
        let Command::Summary(args) = cli.command else {
            panic!("expected summary command");
        };
        assert_eq!(args.selection.trinn, elev_model::Trinn::Vg2);
        assert_eq!(
            args.selection.year,
            Some(elev_model::YearId::new(20232024))
        );
        assert_eq!(args.compare.as_ref().map(elev_model::OrgNr::as_str), Some("974557746"));
        assert!(cli.source.offline);
    }

    #[test]
    fn table_accepts_numeric_id() {
        let cli = Cli::parse_from(["elev", "rows", "153"]);
        let Command::Rows(args) = cli.command else {
            panic!("expected rows command");
        };
        assert_eq!(args.table, elev_model::TableKind::Temaer);
    }
}
