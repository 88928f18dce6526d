//! JSON POST with retries, shared by the HTTP delivery providers

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::InfrastructureError;

/// Retry and timeout settings for provider calls
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Initial delay, doubled after every failed attempt
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 500,
            request_timeout_secs: 10,
        }
    }
}

impl RetryPolicy {
    pub(crate) fn client(&self) -> Result<Client, InfrastructureError> {
        Ok(Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()?)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// POST `payload` to `url` with a bearer token and decode the JSON reply.
///
/// Rate limiting, server errors and transport failures are retried; any
/// other non-success status fails at once.
pub(crate) async fn post_json(
    client: &Client,
    url: &str,
    bearer: &str,
    payload: &Value,
    policy: RetryPolicy,
) -> Result<Value, InfrastructureError> {
    let max_retries = policy.max_retries.max(1);
    let mut delay = Duration::from_millis(policy.retry_delay_ms);
    let mut attempts = 0;

    loop {
        attempts += 1;
        debug!(attempt = attempts, max_retries, "Calling delivery provider");

        let outcome = client.post(url).bearer_auth(bearer).json(payload).send().await;

        let retry_reason = match outcome {
            Ok(response) if response.status().is_success() => {
                // Some providers answer 202 with an empty body
                return Ok(response.json::<Value>().await.unwrap_or(Value::Null));
            }
            Ok(response) if is_retryable_status(response.status()) => {
                format!("provider answered {}", response.status())
            }
            Ok(response) => {
                let status = response.status();
                let detail = response.text().await.unwrap_or_default();
                return Err(InfrastructureError::Delivery(format!(
                    "provider rejected the message ({}): {}",
                    status, detail
                )));
            }
            Err(e) if e.is_builder() => return Err(InfrastructureError::Http(e)),
            Err(e) => e.to_string(),
        };

        if attempts >= max_retries {
            return Err(InfrastructureError::Delivery(format!(
                "giving up after {} attempts: {}",
                attempts, retry_reason
            )));
        }

        warn!(
            attempt = attempts,
            reason = %retry_reason,
            "Delivery attempt failed, retrying in {:?}",
            delay
        );
        sleep(delay).await;
        delay = (delay * 2).min(Duration::from_secs(5));
    }
}
