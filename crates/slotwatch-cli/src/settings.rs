//! Configuration file loading and precedence.
//!
//! Values resolve from command-line flags and `SLOTWATCH_*` variables first,
//! then the TOML file, then built-in defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use slotwatch_core::api::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS};
use slotwatch_core::config::{DEFAULT_CONCURRENCY, DEFAULT_RETRY_WINDOW_SECS};
use slotwatch_core::{EventConfig, ScanSettings};

use crate::cli::{Cli, LogFormat, ScanArgs};
use crate::error::CliError;
use crate::logging::LoggingConfig;

pub const DEFAULT_EVENT_CODE: &str = "GA";
pub const DEFAULT_PERFORMANCE_ID: &str = "720553";
pub const DEFAULT_PERFORMANCE_AK: &str = "LVR.EVN21.PRF116669";
pub const DEFAULT_PRICE_TABLE_ID: &str = "1";

/// Contents of the `--config` TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub event: EventSection,
    pub scan: ScanSection,
    pub http: HttpSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventSection {
    pub event_code: Option<String>,
    pub performance_id: Option<String>,
    pub performance_ak: Option<String>,
    pub price_table_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSection {
    pub concurrency: Option<usize>,
    pub retry_window_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSection {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

impl FileConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!("cannot read {}: {error}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }
}

/// Settings shared by every command after precedence is applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub event: EventConfig,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub logging: LoggingConfig,
    scan_concurrency: Option<usize>,
    scan_retry_window: Option<u64>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, CliError> {
        let FileConfig {
            event,
            scan,
            http,
            logging,
        } = file;

        let event = EventConfig::new(
            pick(cli.event.event_code.clone(), event.event_code, DEFAULT_EVENT_CODE),
            pick(
                cli.event.performance_id.clone(),
                event.performance_id,
                DEFAULT_PERFORMANCE_ID,
            ),
            pick(
                cli.event.performance_ak.clone(),
                event.performance_ak,
                DEFAULT_PERFORMANCE_AK,
            ),
            pick(
                cli.event.price_table_id.clone(),
                event.price_table_id,
                DEFAULT_PRICE_TABLE_ID,
            ),
        )?;

        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: cli
                .log_level
                .clone()
                .or(logging.level)
                .unwrap_or(defaults.level),
            format: cli.log_format.or(logging.format).unwrap_or(defaults.format),
        };

        Ok(Self {
            event,
            endpoint: pick(cli.endpoint.clone(), http.endpoint, DEFAULT_ENDPOINT),
            timeout_ms: cli
                .timeout_ms
                .or(http.timeout_ms)
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            logging,
            scan_concurrency: scan.concurrency,
            scan_retry_window: scan.retry_window_seconds,
        })
    }

    /// Scan settings with `scan` flags over the file's `[scan]` section,
    /// restricted to the offered ranges.
    pub fn scan_settings(&self, args: &ScanArgs) -> Result<ScanSettings, CliError> {
        let concurrency = args
            .concurrency
            .or(self.scan_concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);
        let retry_window = args
            .retry_window
            .or(self.scan_retry_window)
            .unwrap_or(DEFAULT_RETRY_WINDOW_SECS);

        Ok(ScanSettings::from_options(concurrency, retry_window)?)
    }
}

fn pick(flag: Option<String>, file: Option<String>, default: &str) -> String {
    flag.or(file).unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let settings =
            Settings::resolve(&parse(&["slotwatch", "months"]), FileConfig::default())
                .expect("defaults are valid");

        assert_eq!(settings.event.event_code(), DEFAULT_EVENT_CODE);
        assert_eq!(settings.event.performance_ak(), DEFAULT_PERFORMANCE_AK);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(settings.logging.level, "warn");

        let scan = settings
            .scan_settings(&ScanArgs::default())
            .expect("default scan settings");
        assert_eq!(scan.concurrency(), 10);
        assert_eq!(scan.retry_window(), Duration::from_secs(120));
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig::from_toml_str(
            r#"
            [event]
            performance_id = "111"
            price_table_id = "7"

            [scan]
            concurrency = 15
            retry_window_seconds = 180

            [http]
            timeout_ms = 2500

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .expect("valid toml");

        let cli = parse(&["slotwatch", "--performance-id", "222", "months"]);
        let settings = Settings::resolve(&cli, file).expect("valid settings");

        assert_eq!(settings.event.performance_id(), "222");
        assert_eq!(settings.event.price_table_id(), "7");
        assert_eq!(settings.timeout_ms, 2500);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);

        let scan_args = ScanArgs {
            retry_window: Some(300),
            ..ScanArgs::default()
        };
        let scan = settings
            .scan_settings(&scan_args)
            .expect("valid scan settings");
        assert_eq!(scan.concurrency(), 15);
        assert_eq!(scan.retry_window(), Duration::from_secs(300));
    }

    #[test]
    fn out_of_range_options_are_rejected() {
        let settings =
            Settings::resolve(&parse(&["slotwatch", "months"]), FileConfig::default())
                .expect("defaults are valid");

        let too_many = ScanArgs {
            concurrency: Some(64),
            ..ScanArgs::default()
        };
        let error = settings
            .scan_settings(&too_many)
            .expect_err("64 workers is out of range");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn blank_identifier_in_file_is_rejected() {
        let file = FileConfig::from_toml_str("[event]\nperformance_ak = \"  \"\n")
            .expect("valid toml");

        let error = Settings::resolve(&parse(&["slotwatch", "months"]), file)
            .expect_err("blank access key must fail");
        assert!(matches!(error, CliError::Validation(_)));
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let error = FileConfig::from_toml_str("[scan]\nworkers = 3\n").expect_err("must fail");
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[http]\nendpoint = \"https://tickets.example.test/api\"")
            .expect("write config");

        let config = FileConfig::load(file.path()).expect("config should load");
        assert_eq!(
            config.http.endpoint.as_deref(),
            Some("https://tickets.example.test/api")
        );
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = FileConfig::load(&dir.path().join("absent.toml")).expect_err("must fail");
        assert!(matches!(error, CliError::Config(_)));
    }
}
