//! Tier 2: headless-browser fetch via headless_chrome, used only when Tier 1
//! fails or returns too little content.

use std::ffi::OsString;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptionsBuilder};
use tracing::warn;

use corpfinder_core::config::{BrowserConfig, GeneralConfig};

use crate::error::FetchError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const SUCCESS_THRESHOLD: usize = 1000;

/// Launch a fresh headless browser, navigate to `url`, and read back the
/// rendered DOM. A new driver is built per page and always closed, including
/// on the timeout path, where the current DOM is still read rather than
/// treated as a hard failure.
pub fn fetch(url: &str, general: &GeneralConfig, browser_cfg: &BrowserConfig) -> Result<Option<String>, FetchError> {
    let args: Vec<OsString> = vec![
        "--disable-gpu".into(),
        "--disable-extensions".into(),
        "--disable-popup-blocking".into(),
        "--disable-notifications".into(),
        "--blink-settings=imagesEnabled=false".into(),
        format!("--user-agent={}", USER_AGENT).into(),
    ];

    let mut builder = LaunchOptionsBuilder::default();
    builder.headless(true).enable_gpu(false).args(args.iter().map(|a| a.as_os_str()).collect());
    if let Some(path) = &browser_cfg.binary_path {
        builder.path(Some(std::path::PathBuf::from(path)));
    }
    let launch_options = builder
        .build()
        .map_err(|e| FetchError::Browser(e.to_string()))?;

    let browser = Browser::new(launch_options).map_err(|e| FetchError::Browser(e.to_string()))?;
    let tab = browser.new_tab().map_err(|e| FetchError::Browser(e.to_string()))?;

    let total = Duration::from_secs(general.request_timeout_seconds);
    tab.set_default_timeout(total);

    if let Err(e) = tab.navigate_to(url) {
        warn!(url, error = %e, "headless navigation failed, reading DOM anyway");
    }

    // `Tab::wait_until_navigated` blocks on the `networkAlmostIdle` lifecycle
    // event, i.e. an "all resources" wait, not the "DOM ready" one this fetch
    // tier wants, and `headless_chrome` has no page-load-strategy knob to ask
    // for the latter directly. Poll `document.readyState` instead, which
    // flips to "interactive" as soon as the DOM is parsed.
    wait_for_dom_ready(&tab, total);

    let html = tab
        .get_content()
        .map_err(|e| FetchError::Browser(e.to_string()))?;

    let _ = tab.close(true);

    let max_bytes = general.max_body_size_mb * 1024 * 1024;
    if html.len() > max_bytes {
        return Err(FetchError::BodyTooLarge { size: html.len(), max: max_bytes });
    }

    Ok(Some(html).filter(|h| h.len() > SUCCESS_THRESHOLD))
}

fn wait_for_dom_ready(tab: &headless_chrome::Tab, total: Duration) {
    let deadline = std::time::Instant::now() + total.min(Duration::from_secs(10));
    let poll_interval = Duration::from_millis(100);

    loop {
        let ready = tab
            .evaluate("document.readyState", false)
            .ok()
            .and_then(|r| r.value)
            .and_then(|v| v.as_str().map(str::to_string));

        match ready.as_deref() {
            Some("interactive") | Some("complete") => return,
            _ => {}
        }

        if std::time::Instant::now() >= deadline {
            return;
        }
        std::thread::sleep(poll_interval);
    }
}
