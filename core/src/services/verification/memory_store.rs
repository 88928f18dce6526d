//! In-process passcode store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp::{OtpCode, OtpPurpose};

use super::traits::OtpStore;

type Key = (String, OtpPurpose);

#[derive(Default)]
struct Entries {
    codes: HashMap<Key, OtpCode>,
    /// Submission count and the expiry of the code it was counted against
    attempts: HashMap<Key, (u32, DateTime<Utc>)>,
}

#[derive(Clone, Default)]
pub struct InMemoryOtpStore {
    entries: Arc<RwLock<Entries>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop codes and attempt counts past their expiry
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.codes.len();
        entries.codes.retain(|_, code| !code.is_expired());
        entries.attempts.retain(|_, (_, expires_at)| *expires_at > now);
        before - entries.codes.len()
    }
}

fn key(recipient_key: &str, purpose: OtpPurpose) -> Key {
    (recipient_key.to_string(), purpose)
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, code: OtpCode) -> Result<(), String> {
        let key = key(&code.recipient_key, code.purpose);
        let mut entries = self.entries.write().await;
        entries.attempts.remove(&key);
        entries.codes.insert(key, code);
        Ok(())
    }

    async fn get(
        &self,
        recipient_key: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, String> {
        Ok(self
            .entries
            .read()
            .await
            .codes
            .get(&key(recipient_key, purpose))
            .cloned())
    }

    async fn record_attempt(&self, code: &OtpCode) -> Result<u32, String> {
        let mut entries = self.entries.write().await;
        let (count, _) = entries
            .attempts
            .entry(key(&code.recipient_key, code.purpose))
            .or_insert((0, code.expires_at));
        *count = count.saturating_add(1);
        Ok(*count)
    }

    async fn remove(&self, recipient_key: &str, purpose: OtpPurpose) -> Result<bool, String> {
        Ok(self
            .entries
            .write()
            .await
            .codes
            .remove(&key(recipient_key, purpose))
            .is_some())
    }
}
