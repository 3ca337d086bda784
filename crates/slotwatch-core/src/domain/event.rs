use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MASK_MIN_LEN: usize = 10;
const MASK_PREFIX: usize = 6;
const MASK_SUFFIX: usize = 4;

/// Vendor product identifiers sent with every API call.
///
/// Built once at startup and shared read-only for the whole scan.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEventConfig", into = "RawEventConfig")]
pub struct EventConfig {
    event_code: String,
    performance_id: String,
    performance_ak: String,
    price_table_id: String,
}

impl EventConfig {
    /// Trims every identifier and rejects empty ones.
    pub fn new(
        event_code: impl Into<String>,
        performance_id: impl Into<String>,
        performance_ak: impl Into<String>,
        price_table_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            event_code: required("eventCode", event_code.into())?,
            performance_id: required("performanceId", performance_id.into())?,
            performance_ak: required("performanceAk", performance_ak.into())?,
            price_table_id: required("priceTableId", price_table_id.into())?,
        })
    }

    pub fn event_code(&self) -> &str {
        &self.event_code
    }

    pub fn performance_id(&self) -> &str {
        &self.performance_id
    }

    pub fn performance_ak(&self) -> &str {
        &self.performance_ak
    }

    pub fn price_table_id(&self) -> &str {
        &self.price_table_id
    }

    /// Form fields in wire order, keyed by their API names.
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("eventCode", self.event_code.as_str()),
            ("performanceId", self.performance_id.as_str()),
            ("performanceAk", self.performance_ak.as_str()),
            ("priceTableId", self.price_table_id.as_str()),
        ]
    }

    /// Access key safe for display: `LVR.EV...6669` for keys longer than ten
    /// characters, the key itself otherwise.
    pub fn masked_access_key(&self) -> String {
        let chars: Vec<char> = self.performance_ak.chars().collect();
        if chars.len() <= MASK_MIN_LEN {
            return self.performance_ak.clone();
        }

        let head: String = chars[..MASK_PREFIX].iter().collect();
        let tail: String = chars[chars.len() - MASK_SUFFIX..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl Debug for EventConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventConfig")
            .field("event_code", &self.event_code)
            .field("performance_id", &self.performance_id)
            .field("performance_ak", &self.masked_access_key())
            .field("price_table_id", &self.price_table_id)
            .finish()
    }
}

fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEventConfig {
    event_code: String,
    performance_id: String,
    performance_ak: String,
    price_table_id: String,
}

impl TryFrom<RawEventConfig> for EventConfig {
    type Error = ValidationError;

    fn try_from(raw: RawEventConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.event_code,
            raw.performance_id,
            raw.performance_ak,
            raw.price_table_id,
        )
    }
}

impl From<EventConfig> for RawEventConfig {
    fn from(value: EventConfig) -> Self {
        Self {
            event_code: value.event_code,
            performance_id: value.performance_id,
            performance_ak: value.performance_ak,
            price_table_id: value.price_table_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EventConfig {
        EventConfig::new("GA", "720553", "LVR.EVN21.PRF116669", "1").expect("valid config")
    }

    #[test]
    fn trims_identifiers() {
        let config = EventConfig::new(" GA ", "720553", "AK", " 1").expect("valid config");
        assert_eq!(config.event_code(), "GA");
        assert_eq!(config.price_table_id(), "1");
    }

    #[test]
    fn rejects_blank_identifier() {
        let err = EventConfig::new("GA", "   ", "AK", "1").expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::EmptyField {
                field: "performanceId"
            }
        );
    }

    #[test]
    fn masks_long_access_key() {
        assert_eq!(sample().masked_access_key(), "LVR.EV...6669");
    }

    #[test]
    fn short_access_key_is_shown_verbatim() {
        let config = EventConfig::new("GA", "1", "0123456789", "1").expect("valid config");
        assert_eq!(config.masked_access_key(), "0123456789");
    }

    #[test]
    fn debug_output_never_contains_full_access_key() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("LVR.EVN21.PRF116669"));
        assert!(rendered.contains("LVR.EV...6669"));
    }

    #[test]
    fn form_fields_use_wire_names() {
        let config = sample();
        let fields = config.form_fields();
        assert_eq!(fields[0], ("eventCode", "GA"));
        assert_eq!(fields[2], ("performanceAk", "LVR.EVN21.PRF116669"));
    }

    #[test]
    fn deserializes_camel_case_and_validates() {
        let parsed: EventConfig = serde_json::from_str(
            r#"{"eventCode":"GA","performanceId":"1","performanceAk":"AK","priceTableId":"1"}"#,
        )
        .expect("config should deserialize");
        assert_eq!(parsed.performance_ak(), "AK");

        let invalid = serde_json::from_str::<EventConfig>(
            r#"{"eventCode":"","performanceId":"1","performanceAk":"AK","priceTableId":"1"}"#,
        );
        assert!(invalid.is_err());
    }
}
