//! Background sweep of expired entries from the in-process cache and
//! passcode store. Without it, entries that are never read again are never
//! dropped.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::cache::MemoryCache;
use super::verification::InMemoryOtpStore;

/// Entries removed by one pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub cache_entries: usize,
    pub passcodes: usize,
}

#[derive(Default)]
pub struct MemorySweeper {
    cache: Option<MemoryCache>,
    otp_store: Option<InMemoryOtpStore>,
    interval_seconds: u64,
}

impl MemorySweeper {
    /// `interval_seconds` of 0 disables the background task
    pub fn new(interval_seconds: u64) -> Self {
        Self {
            interval_seconds,
            ..Self::default()
        }
    }

    pub fn with_cache(mut self, cache: MemoryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_otp_store(mut self, store: InMemoryOtpStore) -> Self {
        self.otp_store = Some(store);
        self
    }

    fn has_work(&self) -> bool {
        self.cache.is_some() || self.otp_store.is_some()
    }

    pub async fn run_once(&self) -> SweepReport {
        let mut report = SweepReport::default();
        if let Some(cache) = &self.cache {
            report.cache_entries = cache.purge_expired().await;
        }
        if let Some(store) = &self.otp_store {
            report.passcodes = store.purge_expired().await;
        }
        if report != SweepReport::default() {
            tracing::debug!(
                cache_entries = report.cache_entries,
                passcodes = report.passcodes,
                "Swept expired in-memory entries"
            );
        }
        report
    }

    /// Spawn the periodic sweep. `None` when disabled or when every backend
    /// is external.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.interval_seconds == 0 || !self.has_work() {
            return None;
        }

        let period = Duration::from_secs(self.interval_seconds);
        tracing::info!(every_seconds = period.as_secs(), "In-memory sweep scheduled");

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.run_once().await;
            }
        }))
    }
}
