//! Sellable-date listing for one month.

use serde_json::Value;
use tracing::debug;

use crate::api::{result_entries, ApiClient};
use crate::{ApiError, VisitDate, YearMonth};

pub const DATE_LIST_EVENT: &str = "date.list.nt";

/// Dates the vendor reports as sellable for `month`, in response order.
///
/// Not retried: a failure here is fatal for the scan that asked.
pub async fn list_dates(api: &ApiClient, month: YearMonth) -> Result<Vec<VisitDate>, ApiError> {
    let date_from = month.first_day().to_string();
    let payload = api
        .post(DATE_LIST_EVENT, &[("dateFrom", date_from.as_str())])
        .await?;

    let dates = parse_date_list(&payload);
    debug!(%month, count = dates.len(), "date list received");
    Ok(dates)
}

/// Reads `api.result.date[*].date`, skipping entries without a usable date.
pub fn parse_date_list(payload: &Value) -> Vec<VisitDate> {
    result_entries(payload, "date")
        .iter()
        .filter_map(|entry| entry.get("date").and_then(Value::as_str))
        .filter_map(|raw| match VisitDate::parse(raw) {
            Ok(date) => Some(date),
            Err(error) => {
                debug!(%error, "skipping unparseable date entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn skips_entries_without_date_field() {
        let payload = json!({
            "api": { "result": { "date": [
                { "date": "2025-03-03" },
                { "label": "no date here" },
                { "date": 20250305 },
                { "date": "not-a-date" },
                { "date": "2025-03-07T00:00:00" }
            ] } }
        });

        let dates: Vec<String> = parse_date_list(&payload)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(dates, vec!["2025-03-03", "2025-03-07"]);
    }

    #[test]
    fn missing_result_path_means_no_dates() {
        assert!(parse_date_list(&json!({ "api": {} })).is_empty());
        assert!(parse_date_list(&json!({ "api": { "result": { "date": [] } } })).is_empty());
    }
}
