//! Per-date slot polling against an unreliable upstream.
//!
//! A poll keeps asking for one date's ticket list until a well-formed list
//! arrives or the deadline passes. Failed attempts are logged and retried after a
//! random pause; they never reach the caller.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{json_kind, ApiClient};
use crate::clock::{Clock, TokioClock};
use crate::retry::{JitterWindow, RetryBudget};
use crate::{ApiError, SlotResult, VisitDate};

pub const TICKET_LIST_EVENT: &str = "ticket.list";

/// Product fields that may carry the entry time, in lookup order.
const TIME_FIELDS: [&str; 3] = ["time", "startTime", "start_time"];

#[derive(Clone)]
pub struct SlotPoller {
    api: Arc<ApiClient>,
    clock: Arc<dyn Clock>,
    jitter: JitterWindow,
}

impl SlotPoller {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_clock(api, Arc::new(TokioClock))
    }

    pub fn with_clock(api: Arc<ApiClient>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            jitter: JitterWindow::default(),
        }
    }

    pub fn with_jitter(mut self, jitter: JitterWindow) -> Self {
        self.jitter = jitter;
        self
    }

    /// Polls `date` until a well-formed ticket list arrives or `deadline`
    /// elapses.
    ///
    /// Returns sorted slots on the first well-formed list, even when it lists
    /// none. Error envelopes and malformed lists are retried. Returns an empty result once the deadline has passed.
    pub async fn poll_slots(&self, date: VisitDate, deadline: Duration) -> SlotResult {
        let budget = RetryBudget::new(deadline).with_jitter(self.jitter);
        let date_from = date.to_string();
        let started = self.clock.now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self
                .api
                .post(TICKET_LIST_EVENT, &[("dateFrom", date_from.as_str())])
                .await
                .and_then(|payload| extract_slots(&payload))
            {
                Ok(slots) => {
                    debug!(%date, attempt, slots = slots.len(), "ticket list received");
                    return SlotResult::new(date, slots);
                }
                Err(error) => {
                    debug!(%date, attempt, %error, "ticket list attempt failed");
                }
            }

            let elapsed = self.clock.now().saturating_duration_since(started);
            match budget.next_delay(elapsed) {
                Some(pause) => self.clock.sleep(pause).await,
                None => {
                    warn!(
                        %date,
                        attempts = attempt,
                        deadline_secs = deadline.as_secs_f64(),
                        "no ticket list before deadline; reporting no slots"
                    );
                    return SlotResult::empty(date);
                }
            }
        }
    }
}

/// Entry times from `api.result.product`, unsorted.
///
/// A missing `product` under a valid `result` object means no slots.
///
/// # Errors
///
/// [`ApiError::Decode`] when `api.result` is not an object, as in the
/// vendor's error envelope, or when `product` is present but not an array.
pub fn extract_slots(payload: &Value) -> Result<Vec<String>, ApiError> {
    let result = payload
        .get("api")
        .and_then(|api| api.get("result"))
        .filter(|result| result.is_object())
        .ok_or_else(|| ApiError::Decode("ticket list without an api.result object".into()))?;

    match result.get("product") {
        None => Ok(Vec::new()),
        Some(Value::Array(products)) => Ok(products.iter().filter_map(product_time).collect()),
        Some(other) => Err(ApiError::Decode(format!(
            "ticket list product is {}, expected an array",
            json_kind(other)
        ))),
    }
}

fn product_time(product: &Value) -> Option<String> {
    TIME_FIELDS.iter().find_map(|field| {
        product
            .get(*field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    })
}
