//! Background purge of refresh tokens and revocation rows past their expiry

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::service::TokenService;
use crate::errors::DomainError;

#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    pub interval_seconds: u64,
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Rows removed by one pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub refresh_tokens: usize,
    pub revocations: usize,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.refresh_tokens + self.revocations
    }
}

pub struct TokenCleanupService {
    tokens: Arc<TokenService>,
    config: TokenCleanupConfig,
}

impl TokenCleanupService {
    pub fn new(tokens: Arc<TokenService>, config: TokenCleanupConfig) -> Self {
        Self { tokens, config }
    }

    /// One pass; a disabled service reports nothing removed
    pub async fn run_once(&self) -> Result<CleanupReport, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupReport::default());
        }
        let report = self.tokens.cleanup_expired().await?;
        if report.total() > 0 {
            tracing::info!(
                refresh_tokens = report.refresh_tokens,
                revocations = report.revocations,
                "Purged expired tokens"
            );
        }
        Ok(report)
    }

    /// Spawn the periodic pass. The first run happens one interval after
    /// startup. `None` when disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            tracing::warn!("Token cleanup is disabled");
            return None;
        }

        let period = Duration::from_secs(self.config.interval_seconds.max(1));
        tracing::info!(every_seconds = period.as_secs(), "Token cleanup scheduled");

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    tracing::error!(error = %e, "Token cleanup failed");
                }
            }
        }))
    }
}
