use std::io::{self, Write};

use slotwatch_core::list_dates;

use crate::cli::{Cli, MonthArgs};
use crate::error::CliError;
use crate::output;
use crate::settings::Settings;

use super::{api_client, resolve_month, today};

pub async fn run(cli: &Cli, settings: &Settings, args: &MonthArgs) -> Result<(), CliError> {
    let month = resolve_month(args, today())?;
    let api = api_client(settings)?;

    eprintln!("{}", output::event_caption(&settings.event));
    let dates = list_dates(&api, month).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render_dates(&mut out, month, &dates, cli.format, cli.pretty)?;
    out.flush()?;
    Ok(())
}
