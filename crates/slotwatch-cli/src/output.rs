//! Rendering of scan reports, date lists and month lists.
//!
//! Results go to the supplied writer (stdout in practice); logs and the event
//! caption go to stderr.

use std::io::Write;

use serde::Serialize;
use slotwatch_core::{EventConfig, ScanReport, VisitDate, YearMonth};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::error::CliError;

const AVAILABLE_MARK: &str = "✅";
const UNAVAILABLE_MARK: &str = "❌";
const TIME_SEPARATOR: &str = ", ";

/// One scanned date, as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub weekday: String,
    pub available: bool,
    pub times: Vec<String>,
}

#[derive(Tabled)]
struct ReportTableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weekday")]
    weekday: String,
    #[tabled(rename = "Available")]
    available: &'static str,
    #[tabled(rename = "Times")]
    times: String,
}

impl From<&ReportRow> for ReportTableRow {
    fn from(row: &ReportRow) -> Self {
        Self {
            date: row.date.clone(),
            weekday: row.weekday.clone(),
            available: if row.available {
                AVAILABLE_MARK
            } else {
                UNAVAILABLE_MARK
            },
            times: row.times.join(TIME_SEPARATOR),
        }
    }
}

#[derive(Debug, Serialize)]
struct ScanOutput<'a> {
    month: YearMonth,
    scanned: usize,
    available: usize,
    dates: &'a [ReportRow],
}

#[derive(Tabled)]
struct DateTableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weekday")]
    weekday: String,
}

#[derive(Tabled)]
struct MonthTableRow {
    #[tabled(rename = "Month")]
    month: String,
}

/// Rows in date order. A date that never answered and a date confirmed
/// sold out look the same here.
pub fn report_rows(report: &ScanReport) -> Vec<ReportRow> {
    report
        .iter()
        .map(|(date, slots)| ReportRow {
            date: date.to_string(),
            weekday: date.weekday().to_string(),
            available: !slots.is_empty(),
            times: slots.to_vec(),
        })
        .collect()
}

/// Caption identifying the scanned product without exposing the full key.
pub fn event_caption(event: &EventConfig) -> String {
    format!(
        "eventCode={} • performanceId={} • priceTableId={} • performanceAk={}",
        event.event_code(),
        event.performance_id(),
        event.price_table_id(),
        event.masked_access_key()
    )
}

pub fn render_report(
    out: &mut impl Write,
    month: YearMonth,
    report: &ScanReport,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let rows = report_rows(report);

    match format {
        OutputFormat::Json => {
            let payload = ScanOutput {
                month,
                scanned: rows.len(),
                available: report.available_count(),
                dates: &rows,
            };
            write_json(out, &payload, pretty)?;
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                writeln!(out, "{month}: no Monday, Wednesday, Friday or Sunday dates on sale")?;
                return Ok(());
            }

            let table = Table::new(rows.iter().map(ReportTableRow::from))
                .with(Style::rounded())
                .to_string();
            writeln!(out, "{table}")?;
            writeln!(
                out,
                "{month}: {} of {} dates with open slots",
                report.available_count(),
                rows.len()
            )?;
        }
    }

    Ok(())
}

pub fn render_dates(
    out: &mut impl Write,
    month: YearMonth,
    dates: &[VisitDate],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, &dates, pretty)?,
        OutputFormat::Table => {
            if dates.is_empty() {
                writeln!(out, "{month}: no dates on sale")?;
                return Ok(());
            }

            let rows = dates.iter().map(|date| DateTableRow {
                date: date.to_string(),
                weekday: date.weekday().to_string(),
            });
            writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;
        }
    }

    Ok(())
}

pub fn render_months(
    out: &mut impl Write,
    months: &[YearMonth],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, &months, pretty)?,
        OutputFormat::Table => {
            let rows = months.iter().map(|month| MonthTableRow {
                month: month.to_string(),
            });
            writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;
        }
    }

    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{payload}")?;
    Ok(())
}
