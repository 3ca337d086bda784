//! Behavior-driven tests for sellable date listing

use std::sync::Arc;

use serde_json::json;
use slotwatch_core::{
    dates::DATE_LIST_EVENT, list_dates, ApiClient, ApiError, EventConfig, HttpResponse,
    ScriptedHttpClient, YearMonth,
};

const ENDPOINT: &str = "https://tickets.example.test/api?method=doJson";

fn api(http: Arc<ScriptedHttpClient>) -> ApiClient {
    let event = EventConfig::new("GA", "720553", "LVR.EVN21.PRF116669", "1")
        .expect("valid event config");
    ApiClient::new(http, ENDPOINT, event).expect("valid api client")
}

fn march() -> YearMonth {
    YearMonth::new(2025, 3).expect("valid month")
}

#[tokio::test]
async fn listing_sends_date_list_request_for_first_of_month() {
    // Given: A vendor with two sellable dates
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::ok_json(
        json!({ "api": { "result": { "date": [
            { "date": "2025-03-03" },
            { "date": "2025-03-04" }
        ] } } })
        .to_string(),
    )));

    // When: March is listed
    let dates = list_dates(&api(http.clone()), march())
        .await
        .expect("listing should succeed");

    // Then: Both dates are returned in response order
    let rendered: Vec<String> = dates.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["2025-03-03", "2025-03-04"]);

    // And: The request carried the event identifiers and dateFrom
    let request = &http.requests()[0];
    assert_eq!(request.form_value("eventName").as_deref(), Some(DATE_LIST_EVENT));
    assert_eq!(request.form_value("dateFrom").as_deref(), Some("2025-03-01"));
    assert_eq!(request.form_value("eventCode").as_deref(), Some("GA"));
    assert_eq!(
        request.form_value("performanceAk").as_deref(),
        Some("LVR.EVN21.PRF116669")
    );
    assert_eq!(request.form_value("priceTableId").as_deref(), Some("1"));
}

#[tokio::test]
async fn empty_or_missing_date_list_is_not_an_error() {
    for body in [
        r#"{"api":{"result":{"date":[]}}}"#,
        r#"{"api":{"result":{}}}"#,
        r#"{"api":{}}"#,
    ] {
        // Given: A vendor response without dates
        let http = Arc::new(ScriptedHttpClient::always(HttpResponse::ok_json(body)));

        // When: The month is listed
        let dates = list_dates(&api(http), march())
            .await
            .expect("missing dates are not an error");

        // Then: No dates are returned
        assert!(dates.is_empty(), "body {body} should list nothing");
    }
}

#[tokio::test]
async fn listing_twice_against_unchanged_upstream_is_idempotent() {
    // Given: A vendor whose date list does not change
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::ok_json(
        json!({ "api": { "result": { "date": [
            { "date": "2025-03-09" }, { "date": "2025-03-03" }, { "note": "closed" }
        ] } } })
        .to_string(),
    )));
    let api = api(http);

    // When: The same month is listed twice
    let first = list_dates(&api, march()).await.expect("first listing");
    let second = list_dates(&api, march()).await.expect("second listing");

    // Then: Both listings are identical
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn listing_failures_are_not_retried() {
    // Given: The vendor returns a server error
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::with_status(
        500,
        "oops",
    )));

    // When: The month is listed
    let error = list_dates(&api(http.clone()), march())
        .await
        .expect_err("listing should fail");

    // Then: The transport error is surfaced after a single request
    assert!(matches!(error, ApiError::Transport(_)));
    assert_eq!(http.request_count(), 1);
}
