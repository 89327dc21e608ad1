use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::config::Config;
use crate::markup;

/// Failure modes of one segment check.
#[derive(thiserror::Error, Debug)]
pub enum SpellError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("speller endpoint returned {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("check cancelled")]
    Cancelled,
}

impl SpellError {
    /// Transport failures and bad statuses are worth retrying; a parse
    /// failure means the vendor changed shape and a retry won't help.
    fn is_retryable(&self) -> bool {
        matches!(self, SpellError::Http(_) | SpellError::Status(_))
    }
}

#[derive(Deserialize)]
struct SpellerResponse {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    result: CheckResult,
}

#[derive(Deserialize)]
struct CheckResult {
    html: String,
}

/// Client for the remote speller service. One instance per check run.
pub struct SpellClient {
    http: reqwest::Client,
    endpoint: String,
    max_retries: u32,
}

impl SpellClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            endpoint: config.endpoint.clone(),
            max_retries: config.max_retries,
        }
    }

    /// Check one segment, returning its adapted HTML fragment.
    ///
    /// Retries transport failures with exponential backoff; the cancel
    /// flag is consulted before every attempt so an abandoned run stops
    /// at the next request boundary.
    pub async fn check(
        &self,
        segment: &str,
        cancel: &Arc<AtomicBool>,
    ) -> Result<String, SpellError> {
        let mut last_err = SpellError::Cancelled;
        for attempt in 0..=self.max_retries {
            if cancel.load(Ordering::Relaxed) {
                return Err(SpellError::Cancelled);
            }
            if attempt > 0 {
                let delay = retry_delay(attempt);
                log::info!(
                    "Retrying segment check in {}s (attempt {} of {})",
                    delay.as_secs(),
                    attempt + 1,
                    self.max_retries + 1
                );
                tokio::time::sleep(delay).await;
                if cancel.load(Ordering::Relaxed) {
                    return Err(SpellError::Cancelled);
                }
            }
            match self.request(segment).await {
                Ok(html) => return Ok(markup::adapt(&html)),
                Err(e) if e.is_retryable() => {
                    log::warn!("Segment check failed: {e}");
                    last_err = e;
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err)
    }

    async fn request(&self, segment: &str) -> Result<String, SpellError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", segment),
                ("where", "nexearch"),
                ("color_blindness", "0"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SpellError::Status(resp.status()));
        }

        let body = resp.text().await?;
        let parsed: SpellerResponse = serde_json::from_str(&body)?;
        Ok(parsed.message.result.html)
    }
}

/// Backoff schedule: 1s, 2s, 4s, ... capped at 30s.
fn retry_delay(attempt: u32) -> Duration {
    let secs = 2_u64.pow(attempt - 1).min(30);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vendor_response_body() {
        let body = r#"{
            "message": {
                "@type": "response",
                "result": {
                    "errata_count": 1,
                    "origin_html": "외않되",
                    "html": "<em class='red_text'>왜 안 돼</em>",
                    "notag_html": "왜 안 돼"
                }
            }
        }"#;
        let parsed: SpellerResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.message.result.html, "<em class='red_text'>왜 안 돼</em>");
    }

    #[test]
    fn missing_html_field_is_a_shape_error() {
        let body = r#"{"message": {"result": {"errata_count": 0}}}"#;
        assert!(serde_json::from_str::<SpellerResponse>(body).is_err());
    }

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(retry_delay(1), Duration::from_secs(1));
        assert_eq!(retry_delay(2), Duration::from_secs(2));
        assert_eq!(retry_delay(3), Duration::from_secs(4));
        assert_eq!(retry_delay(10), Duration::from_secs(30));
    }

    #[test]
    fn shape_errors_are_not_retryable() {
        let err = serde_json::from_str::<SpellerResponse>("{}").unwrap_err();
        assert!(!SpellError::from(err).is_retryable());
    }
}
