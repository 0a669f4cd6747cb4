//! Tier 1: lightweight HTTP fetch via reqwest.

use std::time::Duration;

use tracing::{debug, warn};

use corpfinder_core::config::GeneralConfig;

use crate::error::FetchError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const SUCCESS_THRESHOLD: usize = 700;

/// Issue a GET with a realistic browser UA, a short initial timeout, and a
/// full-timeout retry on connection/timeout failure. Retries once without TLS
/// verification on a TLS failure. Returns `Ok(None)` (not an error) when the
/// response body is shorter than the success threshold, so the caller can
/// fall through to Tier 2.
pub async fn fetch(url: &str, general: &GeneralConfig) -> Result<Option<String>, FetchError> {
    let total = Duration::from_secs(general.request_timeout_seconds);
    let short = Duration::from_secs(5).min(total / 2);
    let max_bytes = general.max_body_size_mb * 1024 * 1024;

    match try_get(url, short, false, max_bytes).await {
        Ok(body) => return Ok(Some(body).filter(|b| b.len() > SUCCESS_THRESHOLD)),
        Err(FetchError::Tls(msg)) => {
            warn!(url, error = %msg, "tls error, retrying without verification");
            return retry_without_verification(url, total, max_bytes).await;
        }
        Err(e @ FetchError::BodyTooLarge { .. }) => return Err(e),
        Err(e) => {
            debug!(url, error = %e, "short-timeout fetch failed, retrying with full timeout");
        }
    }

    match try_get(url, total, false, max_bytes).await {
        Ok(body) => Ok(Some(body).filter(|b| b.len() > SUCCESS_THRESHOLD)),
        Err(FetchError::Tls(msg)) => {
            warn!(url, error = %msg, "tls error, retrying without verification");
            retry_without_verification(url, total, max_bytes).await
        }
        Err(e) => Err(e),
    }
}

async fn retry_without_verification(
    url: &str,
    timeout: Duration,
    max_bytes: usize,
) -> Result<Option<String>, FetchError> {
    let body = try_get(url, timeout, true, max_bytes).await?;
    Ok(Some(body).filter(|b| b.len() > SUCCESS_THRESHOLD))
}

async fn try_get(url: &str, timeout: Duration, skip_verify: bool, max_bytes: usize) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .danger_accept_invalid_certs(skip_verify)
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let resp = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.5")
        .send()
        .await
        .map_err(|e| classify(e, timeout))?;

    resp.error_for_status_ref()
        .map_err(|e| classify(e, timeout))?;

    if let Some(len) = resp.content_length() {
        if len as usize > max_bytes {
            return Err(FetchError::BodyTooLarge { size: len as usize, max: max_bytes });
        }
    }

    let body = resp.text().await.map_err(|e| classify(e, timeout))?;
    if body.len() > max_bytes {
        return Err(FetchError::BodyTooLarge { size: body.len(), max: max_bytes });
    }
    Ok(body)
}

fn classify(e: reqwest::Error, timeout: Duration) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(timeout.as_secs())
    } else if e.is_connect() && e.to_string().to_lowercase().contains("tls") {
        FetchError::Tls(e.to_string())
    } else {
        FetchError::Network(e.to_string())
    }
}
