use std::time::Duration;

use tracing::{debug, warn};

use corpfinder_core::config::{BrowserConfig, GeneralConfig};

use crate::error::FetchError;
use crate::{tier1, tier2};

/// Two-tier fetch with retries and exponential backoff. `retry_count`
/// additional attempts are made around the tier1-then-tier2 fetch; the sleep
/// between attempts is `2 * attempt` seconds.
pub struct Fetcher {
    general: GeneralConfig,
    browser: BrowserConfig,
    retry_count: u32,
}

impl Fetcher {
    pub fn new(general: GeneralConfig, browser: BrowserConfig, retry_count: u32) -> Self {
        Self {
            general,
            browser,
            retry_count,
        }
    }

    /// Returns the page content on success, or the last error and the number
    /// of attempts made once all retries are exhausted.
    pub async fn fetch(&self, url: &str) -> Result<String, (FetchError, u32)> {
        let mut last_error = FetchError::Network("no attempt made".to_string());

        for attempt in 0..=self.retry_count {
            if attempt > 0 {
                debug!(url, attempt, "retrying fetch");
                tokio::time::sleep(Duration::from_secs(2 * attempt as u64)).await;
            }

            match self.try_both_tiers(url).await {
                Ok(content) => return Ok(content),
                Err(e) => {
                    warn!(url, attempt, error = %e, "fetch attempt failed");
                    last_error = e;
                }
            }
        }

        Err((last_error, self.retry_count))
    }

    async fn try_both_tiers(&self, url: &str) -> Result<String, FetchError> {
        match tier1::fetch(url, &self.general).await {
            Ok(Some(body)) => return Ok(body),
            Ok(None) => debug!(url, "tier1 content below threshold, falling back to tier2"),
            Err(e) => {
                debug!(url, error = %e, "tier1 failed, falling back to tier2");
            }
        }

        let general = self.general.clone();
        let browser = self.browser.clone();
        let url = url.to_string();
        let html = tokio::task::spawn_blocking(move || tier2::fetch(&url, &general, &browser))
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))??;

        html.ok_or(FetchError::InsufficientContent {
            len: 0,
            threshold: 1000,
        })
    }
}
