//! CLI argument definitions for the survey dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use elev_cli::config::SourceOverrides;
use elev_cli::logging::LogFormat;
use elev_model::{Kjoenn, OrgNr, Selection, TableKind, Trinn, YearId};

#[derive(Parser)]
#[command(
    name = "elev",
    version,
    about = "School climate survey dashboard for one upper secondary school",
    long_about = "Fetch the four pupil survey tables for one school and for the \
                  national average, then print score cards, trends and detail rows.\n\n\
                  When the statistics API is unreachable, bundled snapshots are used."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Data source settings; each flag overrides the config file.
#[derive(Args)]
pub struct SourceArgs {
    /// TOML file with a `[source]` table.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the statistics export API.
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Organization number of the subject school.
    #[arg(long = "org", value_name = "ORG_NR", global = true)]
    pub org_nr: Option<String>,

    /// Directory with `years.json` and `tabell_{id}.json` snapshots.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Read snapshots only; never contact the API.
    #[arg(long = "offline", global = true)]
    pub offline: bool,
}

impl SourceArgs {
    pub fn overrides(&self) -> SourceOverrides {
        SourceOverrides {
            base_url: self.base_url.clone(),
            org_nr: self.org_nr.clone(),
            data_dir: self.data_dir.clone(),
            timeout_secs: self.timeout_secs,
            offline: self.offline,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the survey years and where they came from.
    Years(OutputArgs),

    /// Score cards for the school against national and comparison values.
    Summary(SummaryArgs),

    /// Year-by-year trend for one table.
    Trend(TrendArgs),

    /// Filtered detail rows for one table.
    Rows(RowsArgs),
}

#[derive(Args)]
pub struct OutputArgs {
    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// Year, grade and gender filters.
#[derive(Args)]
pub struct SelectionArgs {
    /// School year as `TidID`, e.g. 20232024 (default: latest).
    #[arg(long = "year", value_name = "TID_ID")]
    pub year: Option<YearId>,

    /// Grade level: alle, vg1, vg2 or vg3.
    #[arg(long = "trinn", default_value = "alle")]
    pub trinn: Trinn,

    /// Gender: alle, gutt or jente.
    #[arg(long = "kjoenn", default_value = "alle")]
    pub kjoenn: Kjoenn,
}

impl SelectionArgs {
    /// Selection to apply once years are known.
    pub fn selection(&self, latest: Option<YearId>) -> Selection {
        Selection::default()
            .with_year(self.year.or(latest))
            .with_trinn(self.trinn)
            .with_kjoenn(self.kjoenn)
    }
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Organization number of a comparison school.
    #[arg(long = "compare", value_name = "ORG_NR")]
    pub compare: Option<OrgNr>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct TrendArgs {
    /// Table: indikatorer, temaer, mobbing, deltakelse (or 152-155).
    #[arg(value_name = "TABLE")]
    pub table: TableKind,

    /// Every indicator group instead of the six main ones.
    #[arg(long = "all-groups")]
    pub all_groups: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct RowsArgs {
    /// Table: indikatorer, temaer, mobbing, deltakelse (or 152-155).
    #[arg(value_name = "TABLE")]
    pub table: TableKind,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub output: OutputArgs,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
