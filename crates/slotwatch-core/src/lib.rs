//! # Slotwatch Core
//!
//! Finds open visiting slots for one ticketed event by polling the vendor's
//! remoting API.
//!
//! ## Overview
//!
//! A scan runs in three steps:
//!
//! 1. **List** the sellable dates of a month (one `date.list.nt` call).
//! 2. **Filter** them to Mondays, Wednesdays, Fridays and Sundays.
//! 3. **Poll** every remaining date with `ticket.list` on a bounded worker
//!    pool, retrying each date with a random pause until it answers or its
//!    retry window runs out.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Form-encoded POST wrapper and JSON envelope decoding |
//! | [`clock`] | Injectable time source for the poller |
//! | [`config`] | Scan settings (pool size, retry window) |
//! | [`dates`] | Date lister |
//! | [`domain`] | Event identifiers, dates, months, results |
//! | [`error`] | Error types |
//! | [`http_client`] | Transport trait with reqwest and scripted implementations |
//! | [`poller`] | Per-date retrying slot poller |
//! | [`retry`] | Jitter window and deadline budget |
//! | [`scan`] | Month scan orchestrator |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use slotwatch_core::{ApiClient, EventConfig, ReqwestHttpClient, ScanSettings, Scanner, YearMonth};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let event = EventConfig::new("GA", "720553", "LVR.EVN21.PRF116669", "1")?;
//!     let http = Arc::new(ReqwestHttpClient::try_new()?);
//!     let api = Arc::new(ApiClient::new(http, slotwatch_core::api::DEFAULT_ENDPOINT, event)?);
//!
//!     let scanner = Scanner::new(api, ScanSettings::from_options(10, 120)?);
//!     let report = scanner.scan_month(YearMonth::new(2025, 3)?).await?;
//!
//!     for (date, slots) in report.iter() {
//!         println!("{date}: {}", slots.join(", "));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only the date listing can fail a scan. Slot polls swallow transport and
//! decode failures and retry; a date that never answers is reported with no
//! slots, exactly like a date the vendor confirmed as sold out.

pub mod api;
pub mod clock;
pub mod config;
pub mod dates;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod poller;
pub mod retry;
pub mod scan;

pub use api::ApiClient;
pub use clock::{Clock, ManualClock, TokioClock};
pub use config::ScanSettings;
pub use dates::list_dates;
pub use domain::{EventConfig, ScanReport, SlotResult, VisitDate, YearMonth};
pub use error::{ApiError, ScanError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, ScriptedHttpClient,
};
pub use poller::SlotPoller;
pub use retry::{JitterWindow, RetryBudget};
pub use scan::{filter_target_dates, is_target_weekday, Scanner, TARGET_WEEKDAYS};
