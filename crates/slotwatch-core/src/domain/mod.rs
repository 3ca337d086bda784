//! # Domain Models
//!
//! Value types shared by the date lister, slot poller and scan orchestrator.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EventConfig`] | Vendor product identifiers sent with every call |
//! | [`VisitDate`] | Sellable calendar date, ISO formatted on the wire |
//! | [`YearMonth`] | Month a scan targets, plus the candidate month list |
//! | [`SlotResult`] | Sorted time slots found for one date |
//! | [`ScanReport`] | Date → slots mapping for a finished scan |
//!
//! All types validate at construction time and are immutable afterwards.

mod date;
mod event;
mod month;
mod report;

pub use date::VisitDate;
pub use event::EventConfig;
pub use month::YearMonth;
pub use report::{ScanReport, SlotResult};
