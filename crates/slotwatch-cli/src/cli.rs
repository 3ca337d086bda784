//! CLI argument definitions for slotwatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scan` | Poll every Mon/Wed/Fri/Sun of a month for open slots |
//! | `dates` | List the sellable dates of a month |
//! | `months` | List the months a scan may target |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | none | TOML file with event, scan, http and logging sections |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--endpoint` | vendor URL | API endpoint |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `--log-level` | `warn` | Log filter when `RUST_LOG` is unset |
//!
//! Every option falls back to the config file, then to built-in defaults.
//!
//! # Examples
//!
//! ```bash
//! # Scan the current month with the default event
//! slotwatch scan
//!
//! # Scan June with a larger pool and a five-minute retry window
//! slotwatch scan --month 6 --concurrency 20 --retry-window 300
//!
//! # Machine-readable output
//! slotwatch --format json --pretty scan --month 6
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Slotwatch - find open visiting slots for a ticketed event
#[derive(Debug, Parser)]
#[command(
    name = "slotwatch",
    author,
    version,
    about = "Find open visiting slots for a ticketed event",
    long_about = "Slotwatch lists the sellable dates of a month, keeps Mondays, Wednesdays, \
Fridays and Sundays, and polls each of them for entry times on a bounded worker pool, \
retrying every date until it answers or its retry window runs out."
)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "SLOTWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Ticketing API endpoint.
    #[arg(long, global = true, env = "SLOTWATCH_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, env = "SLOTWATCH_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Log filter used when RUST_LOG is unset (e.g. info, slotwatch_core=debug).
    #[arg(long, global = true, env = "SLOTWATCH_LOG")]
    pub log_level: Option<String>,

    /// Log line format.
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(flatten)]
    pub event: EventArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table for terminal display.
    Table,
    /// Single JSON document.
    Json,
}

/// Log line format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Event identifier overrides.
#[derive(Debug, Default, Args)]
pub struct EventArgs {
    /// Vendor event code.
    #[arg(long, global = true, env = "SLOTWATCH_EVENT_CODE")]
    pub event_code: Option<String>,

    /// Vendor performance id.
    #[arg(long, global = true, env = "SLOTWATCH_PERFORMANCE_ID")]
    pub performance_id: Option<String>,

    /// Vendor performance access key.
    #[arg(long, global = true, env = "SLOTWATCH_PERFORMANCE_AK")]
    pub performance_ak: Option<String>,

    /// Vendor price table id.
    #[arg(long, global = true, env = "SLOTWATCH_PRICE_TABLE_ID")]
    pub price_table_id: Option<String>,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll a month's target weekdays for open entry times.
    ///
    /// # Examples
    ///
    ///   slotwatch scan
    ///   slotwatch scan --month 6 --concurrency 20
    ///   slotwatch scan --month 1 --year 2026 --retry-window 60
    Scan(ScanArgs),

    /// List the sellable dates of a month without polling slots.
    Dates(MonthArgs),

    /// List the months a scan may target.
    Months,
}

/// Month selection shared by `scan` and `dates`.
#[derive(Debug, Default, Args)]
pub struct MonthArgs {
    /// Month number (1-12). Defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,

    /// Year. Without it the month must be one of the offered months.
    #[arg(long, requires = "month")]
    pub year: Option<i32>,
}

/// Arguments for the `scan` command.
#[derive(Debug, Default, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub month: MonthArgs,

    /// Number of dates polled at the same time (5-40).
    #[arg(long, env = "SLOTWATCH_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Seconds each date is retried before giving up (60, 120, 180 or 300).
    #[arg(long, env = "SLOTWATCH_RETRY_WINDOW")]
    pub retry_window: Option<u64>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_scan_with_overrides() {
        let cli = Cli::try_parse_from([
            "slotwatch",
            "--format",
            "json",
            "scan",
            "--month",
            "6",
            "--concurrency",
            "20",
            "--performance-id",
            "42",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.event.performance_id.as_deref(), Some("42"));
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.month.month, Some(6));
                assert_eq!(args.concurrency, Some(20));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn year_requires_month() {
        assert!(Cli::try_parse_from(["slotwatch", "dates", "--year", "2026"]).is_err());
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["slotwatch", "dates", "--month", "13"]).is_err());
    }
}
