mod dates;
mod months;
mod scan;

use std::sync::Arc;

use slotwatch_core::{ApiClient, ReqwestHttpClient, YearMonth};
use time::{Date, OffsetDateTime};

use crate::cli::{Cli, Command, MonthArgs};
use crate::error::CliError;
use crate::settings::Settings;

pub async fn run(cli: &Cli, settings: &Settings) -> Result<(), CliError> {
    match &cli.command {
        Command::Scan(args) => scan::run(cli, settings, args).await,
        Command::Dates(args) => dates::run(cli, settings, args).await,
        Command::Months => months::run(cli),
    }
}

/// Local calendar date, falling back to UTC when the offset is unknown.
pub(crate) fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Pick the target month.
///
/// Without flags this is the current month. A bare `--month` must name one
/// of the offered months; `--month` with `--year` may name any month.
pub(crate) fn resolve_month(args: &MonthArgs, today: Date) -> Result<YearMonth, CliError> {
    match (args.month, args.year) {
        (Some(month), Some(year)) => Ok(YearMonth::new(year, month)?),
        (Some(month), None) => {
            let offered = YearMonth::candidates(today);
            offered
                .iter()
                .copied()
                .find(|candidate| candidate.month_number() == month)
                .ok_or_else(|| CliError::MonthNotOffered {
                    month,
                    offered: offered
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                })
        }
        (None, _) => Ok(YearMonth::from(today)),
    }
}

pub(crate) fn api_client(settings: &Settings) -> Result<Arc<ApiClient>, CliError> {
    let http = Arc::new(ReqwestHttpClient::try_new()?);
    let api = ApiClient::new(http, settings.endpoint.clone(), settings.event.clone())?
        .with_timeout_ms(settings.timeout_ms);
    Ok(Arc::new(api))
}
