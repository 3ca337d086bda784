use std::io::{self, Write};

use slotwatch_core::YearMonth;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output;

use super::today;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    let months = YearMonth::candidates(today());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render_months(&mut out, &months, cli.format, cli.pretty)?;
    out.flush()?;
    Ok(())
}
