use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use corpfinder_core::config::AppConfig;
use corpfinder_core::CompanyRecord;
use corpfinder_dataset::csv_io::{load_name_rows, load_scraped_rows};
use corpfinder_fetch::Fetcher;
use corpfinder_index::{default_schema, ElasticsearchIndex, Index};
use corpfinder_matcher::Matcher;

pub async fn scrape(config: &AppConfig, input: &str, output: &str) -> Result<()> {
    let urls = read_domain_column(input)?;
    info!(count = urls.len(), "starting scrape");

    let fetcher = Arc::new(Fetcher::new(
        config.general.clone(),
        config.browser.clone(),
        config.pipeline.retry_count,
    ));

    let rows = corpfinder_pipeline::run(
        urls,
        fetcher,
        config.pipeline.max_concurrency,
        Duration::from_secs(config.general.wall_clock_limit_seconds),
    )
    .await?;

    let analysis = corpfinder_pipeline::analyze(&rows);
    info!(
        coverage_pct = analysis.coverage_percentage,
        successful = analysis.successful_scrapes,
        total = analysis.total_websites,
        "scrape complete"
    );

    corpfinder_dataset::csv_out::write_scraped_rows(output, &rows)?;
    println!("wrote {} rows to {}", rows.len(), output);
    Ok(())
}

pub async fn build_index(config: &AppConfig, scraped: &str, names: &str, output: &str) -> Result<()> {
    let scraped_rows = load_scraped_rows(scraped).context("loading scraped rows")?;
    let name_rows = load_name_rows(names).context("loading company names")?;
    let records: Vec<CompanyRecord> = corpfinder_dataset::merge(scraped_rows, name_rows);

    corpfinder_dataset::csv_out::write_company_records(output, &records)?;
    println!("wrote {} merged records to {}", records.len(), output);

    let index = ElasticsearchIndex::new(&config.elasticsearch)?;
    index
        .create_or_replace(&config.elasticsearch.index_name, default_schema())
        .await?;

    let outcome = index
        .bulk_load(&config.elasticsearch.index_name, &records, 500)
        .await?;
    if outcome.success_count == 0 && !records.is_empty() {
        anyhow::bail!("bulk load indexed zero documents out of {}", records.len());
    }
    if !outcome.errors.is_empty() {
        warn!(errors = outcome.errors.len(), "some documents failed to index");
    }
    index.refresh(&config.elasticsearch.index_name).await?;
    info!(
        success_count = outcome.success_count,
        error_count = outcome.errors.len(),
        "index build complete"
    );
    Ok(())
}

pub async fn match_csv(config: &AppConfig, input: &str, output: &str) -> Result<()> {
    let rows = corpfinder_dataset::load_api_input_rows(input).context("loading API input rows")?;
    let index = Arc::new(ElasticsearchIndex::new(&config.elasticsearch)?);
    let matcher = Matcher::new(index, config.elasticsearch.index_name.clone());

    let mut matched_rows = Vec::with_capacity(rows.len());
    let mut match_count = 0usize;
    for row in rows {
        let query = (&row).into();
        let result = matcher.match_query(&query).await?;
        if result.is_some() {
            match_count += 1;
        }
        matched_rows.push((row, result));
    }

    corpfinder_dataset::csv_out::write_match_results(output, &matched_rows)?;
    println!(
        "matched {}/{} rows ({:.2}%), wrote results to {}",
        match_count,
        matched_rows.len(),
        if matched_rows.is_empty() { 0.0 } else { match_count as f64 / matched_rows.len() as f64 * 100.0 },
        output
    );
    Ok(())
}

/// On `serve`/`build-index` startup, reports whether the target index
/// exists and its document count. A store that cannot be reached is logged
/// as a warning, not a fatal error: the operator is told the API may run in
/// a degraded state rather than having the process refuse to start.
pub async fn index_status_report(config: &AppConfig) {
    let index = match ElasticsearchIndex::new(&config.elasticsearch) {
        Ok(index) => index,
        Err(e) => {
            warn!(error = %e, "could not construct index client, API functionality may be degraded");
            return;
        }
    };
    let matcher = Matcher::new(Arc::new(index), config.elasticsearch.index_name.clone());
    match matcher.index_report(&config.elasticsearch.index_name).await {
        Ok(Some(count)) => info!(index = config.elasticsearch.index_name, count, "index status: ready"),
        Ok(None) => warn!(
            index = config.elasticsearch.index_name,
            "index does not exist yet, run build-index first"
        ),
        Err(e) => warn!(error = %e, "could not reach index store, API functionality may be degraded"),
    }
}

fn read_domain_column(path: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(Path::new(path)).with_context(|| format!("opening {path}"))?;
    let headers = reader.headers()?.clone();
    let domain_idx = headers
        .iter()
        .position(|h| h == "domain")
        .context("input CSV has no `domain` column")?;

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(domain) = record.get(domain_idx) {
            if !domain.trim().is_empty() {
                out.push(domain.trim().to_string());
            }
        }
    }
    Ok(out)
}
