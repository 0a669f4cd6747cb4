use corpfinder_core::{FillRates, PipelineAnalysis, RetryStats, ScrapeStatus, ScrapedRow};

/// Compute aggregate coverage/fill-rate/retry statistics over a completed run.
pub fn analyze(rows: &[ScrapedRow]) -> PipelineAnalysis {
    let total = rows.len();
    let successful = rows
        .iter()
        .filter(|r| r.status == ScrapeStatus::Success)
        .count();

    let coverage_percentage = percentage(successful, total);

    let fill_rates = FillRates {
        phones: percentage(count_nonempty(rows, |r| &r.phones), total),
        addresses: percentage(count_nonempty(rows, |r| &r.addresses), total),
        facebook_links: percentage(count_nonempty(rows, |r| &r.facebook_links), total),
        twitter_links: percentage(count_nonempty(rows, |r| &r.twitter_links), total),
        instagram_links: percentage(count_nonempty(rows, |r| &r.instagram_links), total),
        linkedin_links: percentage(count_nonempty(rows, |r| &r.linkedin_links), total),
        youtube_links: percentage(count_nonempty(rows, |r| &r.youtube_links), total),
    };

    let retried_rows: Vec<u32> = rows
        .iter()
        .filter(|r| r.retries > 0)
        .map(|r| r.retries)
        .collect();
    let retry_stats = RetryStats {
        retried: retried_rows.len(),
        avg_retries: if total == 0 {
            0.0
        } else {
            rows.iter().map(|r| r.retries).sum::<u32>() as f64 / total as f64
        },
        max_retries: retried_rows.iter().copied().max().unwrap_or(0),
    };

    PipelineAnalysis {
        total_websites: total,
        successful_scrapes: successful,
        coverage_percentage,
        fill_rates,
        retry_stats,
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

fn count_nonempty(rows: &[ScrapedRow], field: impl Fn(&ScrapedRow) -> &Vec<String>) -> usize {
    rows.iter().filter(|r| !field(r).is_empty()).count()
}
