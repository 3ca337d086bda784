use std::io::{self, Write};
use std::time::Instant;

use slotwatch_core::Scanner;
use tracing::info;

use crate::cli::{Cli, ScanArgs};
use crate::error::CliError;
use crate::output;
use crate::settings::Settings;

use super::{api_client, resolve_month, today};

pub async fn run(cli: &Cli, settings: &Settings, args: &ScanArgs) -> Result<(), CliError> {
    let month = resolve_month(&args.month, today())?;
    let scan_settings = settings.scan_settings(args)?;
    let scanner = Scanner::new(api_client(settings)?, scan_settings);

    eprintln!("{}", output::event_caption(&settings.event));
    info!(
        %month,
        concurrency = scan_settings.concurrency(),
        retry_window_secs = scan_settings.retry_window().as_secs(),
        "starting scan"
    );

    let started = Instant::now();
    let report = scanner.scan_month(month).await?;
    info!(
        %month,
        dates = report.len(),
        available = report.available_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scan finished"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render_report(&mut out, month, &report, cli.format, cli.pretty)?;
    out.flush()?;
    Ok(())
}
