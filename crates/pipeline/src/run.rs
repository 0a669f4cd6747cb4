use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tracing::info;

use corpfinder_core::{ScrapeStatus, ScrapedRow};
use corpfinder_fetch::Fetcher;
use corpfinder_signals::extract;
use corpfinder_signals::normalize;

use crate::error::PipelineError;
use crate::text::body_text;

/// Run the fetcher across `urls` with bounded parallelism `concurrency`,
/// collecting results as they complete. Callers must key results by
/// `website`; no ordering is guaranteed. Aborts with an error if the whole
/// run exceeds `wall_clock_limit`.
pub async fn run(
    urls: Vec<String>,
    fetcher: Arc<Fetcher>,
    concurrency: usize,
    wall_clock_limit: Duration,
) -> Result<Vec<ScrapedRow>, PipelineError> {
    let total = urls.len();
    let queue = Arc::new(Mutex::new(VecDeque::from(urls)));
    let (tx, mut rx) = mpsc::channel::<ScrapedRow>(total.max(1));

    let worker_count = concurrency.min(total.max(1));
    info!(total, worker_count, "starting scrape pipeline");

    let mut handles = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let queue = Arc::clone(&queue);
        let fetcher = Arc::clone(&fetcher);
        let tx = tx.clone();
        handles.push(tokio::spawn(async move {
            loop {
                let next = queue.lock().await.pop_front();
                let Some(url) = next else { break };
                let row = scrape_one(&fetcher, url).await;
                if tx.send(row).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx);

    let collect = async {
        let mut rows = Vec::with_capacity(total);
        while let Some(row) = rx.recv().await {
            rows.push(row);
        }
        for handle in handles {
            let _ = handle.await;
        }
        rows
    };

    match tokio::time::timeout(wall_clock_limit, collect).await {
        Ok(rows) => Ok(rows),
        Err(_) => Err(PipelineError::WallClockExceeded(wall_clock_limit.as_secs())),
    }
}

async fn scrape_one(fetcher: &Fetcher, url: String) -> ScrapedRow {
    let website = if url.starts_with("http://") || url.starts_with("https://") {
        url.clone()
    } else {
        format!("http://{}", url)
    };
    let domain = normalize::domain(&website).unwrap_or_else(|| url.clone());

    match fetcher.fetch(&website).await {
        Ok(html) => {
            let text = body_text(&html);
            let phones = extract::phones(&text);
            let addresses = extract::addresses(&text);
            let social = extract::social_media(&html);

            ScrapedRow {
                website,
                domain,
                status: ScrapeStatus::Success,
                phones,
                addresses,
                facebook_links: social.facebook,
                twitter_links: social.twitter,
                instagram_links: social.instagram,
                linkedin_links: social.linkedin,
                youtube_links: social.youtube,
                retries: 0,
                error: None,
            }
        }
        Err((error, retries)) => ScrapedRow::failed(website, domain, retries, error.to_string()),
    }
}
