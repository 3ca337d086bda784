//! Client for the vendor's single JSON remoting endpoint.
//!
//! Every call is a form-encoded POST whose `eventName` field selects the
//! operation; results come back wrapped as `{ "api": { "result": { ... } } }`.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde_json::Value;

use crate::http_client::{HttpClient, HttpRequest};
use crate::{ApiError, EventConfig, ValidationError};

pub const DEFAULT_ENDPOINT: &str =
    "https://www.ticketlouvre.fr/louvre/api/RemotingService.cfc?method=doJson";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const BYTE_ORDER_MARK: char = '\u{feff}';
const HIJACK_PREFIX: &str = "//";

/// Issues API calls for one event, sharing a single transport.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    endpoint: String,
    event: Arc<EventConfig>,
    timeout_ms: u64,
}

impl ApiClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        endpoint: impl Into<String>,
        event: EventConfig,
    ) -> Result<Self, ValidationError> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ValidationError::InvalidEndpoint { value: endpoint });
        }

        Ok(Self {
            http,
            endpoint,
            event: Arc::new(event),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn event(&self) -> &EventConfig {
        &self.event
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `eventName`, the event identifiers and `extra` fields, and
    /// decodes the JSON body.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] on network failure or a non-2xx status,
    /// [`ApiError::Decode`] when the body is not a JSON object.
    pub async fn post(&self, event_name: &str, extra: &[(&str, &str)]) -> Result<Value, ApiError> {
        let fields = std::iter::once(("eventName", event_name))
            .chain(self.event.form_fields())
            .chain(extra.iter().copied());

        let request = HttpRequest::post(self.endpoint.as_str())
            .with_form(fields)
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|error| ApiError::Transport(error.message().to_owned()))?;

        if !response.is_success() {
            return Err(ApiError::Transport(format!(
                "{event_name} returned status {}",
                response.status
            )));
        }

        decode_payload(&response.body)
    }
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .field("event", &self.event)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

/// Parses a response body regardless of its declared content type.
///
/// A body that fails to parse as-is gets a second attempt with a UTF-8 byte
/// order mark and a leading `//` guard removed.
pub fn decode_payload(body: &str) -> Result<Value, ApiError> {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(error) => {
            let stripped = body.trim_start_matches(BYTE_ORDER_MARK).trim_start();
            let stripped = stripped.strip_prefix(HIJACK_PREFIX).unwrap_or(stripped);
            serde_json::from_str::<Value>(stripped)
                .map_err(|_| ApiError::Decode(error.to_string()))?
        }
    };

    if !value.is_object() {
        return Err(ApiError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    Ok(value)
}

/// Entries under `api.result.<key>`; anything missing or not an array is empty.
pub fn result_entries<'a>(payload: &'a Value, key: &str) -> &'a [Value] {
    payload
        .get("api")
        .and_then(|api| api.get("result"))
        .and_then(|result| result.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
