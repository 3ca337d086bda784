//! Month scan: list dates once, keep the target weekdays, poll each date on a
//! bounded worker pool and collect results as they complete.

use std::collections::BTreeSet;
use std::sync::Arc;

use time::Weekday;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::clock::{Clock, TokioClock};
use crate::config::ScanSettings;
use crate::dates::list_dates;
use crate::poller::SlotPoller;
use crate::{ApiClient, ScanError, ScanReport, VisitDate, YearMonth};

/// Weekdays a scan polls: Monday, Wednesday, Friday and Sunday.
pub const TARGET_WEEKDAYS: [Weekday; 4] = [
    Weekday::Monday,
    Weekday::Wednesday,
    Weekday::Friday,
    Weekday::Sunday,
];

pub fn is_target_weekday(date: VisitDate) -> bool {
    TARGET_WEEKDAYS.contains(&date.weekday())
}

/// Distinct target-weekday dates from `dates`, in calendar order.
pub fn filter_target_dates(dates: impl IntoIterator<Item = VisitDate>) -> BTreeSet<VisitDate> {
    dates.into_iter().filter(|date| is_target_weekday(*date)).collect()
}

/// Scan orchestrator for one event.
#[derive(Clone)]
pub struct Scanner {
    api: Arc<ApiClient>,
    poller: SlotPoller,
    settings: ScanSettings,
}

impl Scanner {
    pub fn new(api: Arc<ApiClient>, settings: ScanSettings) -> Self {
        Self::with_clock(api, settings, Arc::new(TokioClock))
    }

    pub fn with_clock(api: Arc<ApiClient>, settings: ScanSettings, clock: Arc<dyn Clock>) -> Self {
        let poller = SlotPoller::with_clock(Arc::clone(&api), clock).with_jitter(settings.jitter());
        Self {
            api,
            poller,
            settings,
        }
    }

    pub const fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Scans `month` and returns one entry per target-weekday date.
    ///
    /// # Errors
    ///
    /// [`ScanError::DateList`] when the date list cannot be fetched; slot
    /// polls never fail.
    pub async fn scan_month(&self, month: YearMonth) -> Result<ScanReport, ScanError> {
        let listed = list_dates(&self.api, month).await?;
        let listed_count = listed.len();
        let targets = filter_target_dates(listed);
        info!(
            %month,
            listed = listed_count,
            targets = targets.len(),
            "date list filtered to target weekdays"
        );

        let mut report = ScanReport::new();
        if targets.is_empty() {
            return Ok(report);
        }

        let permits = Arc::new(Semaphore::new(self.settings.concurrency()));
        let deadline = self.settings.retry_window();
        let mut tasks = JoinSet::new();

        for date in targets {
            let permits = Arc::clone(&permits);
            let poller = self.poller.clone();
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await?;
                Ok::<_, tokio::sync::AcquireError>(poller.poll_slots(date, deadline).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let result = joined??;
            debug!(date = %result.date(), slots = result.slots().len(), "date polled");
            report.insert(result);
        }

        info!(
            %month,
            dates = report.len(),
            available = report.available_count(),
            "scan complete"
        );
        Ok(report)
    }
}
