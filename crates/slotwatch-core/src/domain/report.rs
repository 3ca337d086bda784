use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::VisitDate;

/// Time slots found for one date.
///
/// An empty slot list covers both "the vendor confirmed nothing is left" and
/// "no successful response arrived before the deadline".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResult {
    date: VisitDate,
    slots: Vec<String>,
}

impl SlotResult {
    /// Sorts `slots` lexicographically; duplicates are kept.
    pub fn new(date: VisitDate, mut slots: Vec<String>) -> Self {
        slots.sort();
        Self { date, slots }
    }

    pub const fn empty(date: VisitDate) -> Self {
        Self {
            date,
            slots: Vec::new(),
        }
    }

    pub const fn date(&self) -> VisitDate {
        self.date
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn is_available(&self) -> bool {
        !self.slots.is_empty()
    }

    pub fn into_parts(self) -> (VisitDate, Vec<String>) {
        (self.date, self.slots)
    }
}

/// Date → slots mapping produced by a month scan, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanReport {
    entries: BTreeMap<VisitDate, Vec<String>>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished poll. Returns `false` if the date was already present.
    pub(crate) fn insert(&mut self, result: SlotResult) -> bool {
        let (date, slots) = result.into_parts();
        match self.entries.entry(date) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(slots);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, date: &VisitDate) -> Option<&[String]> {
        self.entries.get(date).map(Vec::as_slice)
    }

    pub fn contains(&self, date: &VisitDate) -> bool {
        self.entries.contains_key(date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = VisitDate> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisitDate, &[String])> + '_ {
        self.entries
            .iter()
            .map(|(date, slots)| (*date, slots.as_slice()))
    }

    /// Number of dates with at least one slot.
    pub fn available_count(&self) -> usize {
        self.entries.values().filter(|slots| !slots.is_empty()).count()
    }
}

impl FromIterator<SlotResult> for ScanReport {
    fn from_iter<T: IntoIterator<Item = SlotResult>>(iter: T) -> Self {
        let mut report = Self::new();
        for result in iter {
            report.insert(result);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn slot_result_sorts_times() {
        let result = SlotResult::new(
            VisitDate::new(date!(2025 - 03 - 03)),
            vec!["10:00".into(), "09:00".into(), "09:00".into()],
        );
        assert_eq!(result.slots(), ["09:00", "09:00", "10:00"]);
        assert!(result.is_available());
    }

    #[test]
    fn report_keeps_first_entry_per_date() {
        let date = VisitDate::new(date!(2025 - 03 - 03));
        let mut report = ScanReport::new();

        assert!(report.insert(SlotResult::new(date, vec!["09:00".into()])));
        assert!(!report.insert(SlotResult::empty(date)));

        assert_eq!(report.len(), 1);
        assert_eq!(report.get(&date), Some(["09:00".to_owned()].as_slice()));
    }

    #[test]
    fn report_iterates_in_date_order_and_counts_availability() {
        let report: ScanReport = vec![
            SlotResult::empty(VisitDate::new(date!(2025 - 03 - 09))),
            SlotResult::new(VisitDate::new(date!(2025 - 03 - 03)), vec!["10:00".into()]),
        ]
        .into_iter()
        .collect();

        let dates: Vec<String> = report.dates().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2025-03-03", "2025-03-09"]);
        assert_eq!(report.available_count(), 1);
    }

    #[test]
    fn report_serializes_as_date_keyed_object() {
        let report: ScanReport = vec![SlotResult::new(
            VisitDate::new(date!(2025 - 03 - 03)),
            vec!["10:00".into()],
        )]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json, serde_json::json!({ "2025-03-03": ["10:00"] }));
    }
}
