use std::path::Path;

use corpfinder_core::{CompanyRecord, ScrapedRow};
use serde::Serialize;

use crate::error::DatasetError;

fn list_literal(items: &[String]) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    let quoted: Vec<String> = items.iter().map(|s| format!("'{}'", s.replace('\'', "\\'"))).collect();
    format!("[{}]", quoted.join(", "))
}

#[derive(Serialize)]
struct ScrapedRowOut<'a> {
    website: &'a str,
    domain: &'a str,
    status: &'a str,
    phones: String,
    addresses: String,
    facebook_links: String,
    twitter_links: String,
    instagram_links: String,
    linkedin_links: String,
    youtube_links: String,
    retries: u32,
    error: &'a str,
}

pub fn write_scraped_rows(path: impl AsRef<Path>, rows: &[ScrapedRow]) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;

    for row in rows {
        let status = match row.status {
            corpfinder_core::ScrapeStatus::Success => "success",
            corpfinder_core::ScrapeStatus::Failed => "failed",
        };
        writer
            .serialize(ScrapedRowOut {
                website: &row.website,
                domain: &row.domain,
                status,
                phones: list_literal(&row.phones),
                addresses: list_literal(&row.addresses),
                facebook_links: list_literal(&row.facebook_links),
                twitter_links: list_literal(&row.twitter_links),
                instagram_links: list_literal(&row.instagram_links),
                linkedin_links: list_literal(&row.linkedin_links),
                youtube_links: list_literal(&row.youtube_links),
                retries: row.retries,
                error: row.error.as_deref().unwrap_or(""),
            })
            .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;
    Ok(())
}

#[derive(Serialize)]
struct CompanyRecordOut<'a> {
    company_id: &'a str,
    website: &'a str,
    domain: &'a str,
    company_commercial_name: &'a str,
    company_legal_name: &'a str,
    company_all_names: &'a str,
    phones: String,
    phones_normalized: String,
    addresses: String,
    facebook_links: String,
    facebook_links_normalized: String,
    twitter_links: String,
    instagram_links: String,
    linkedin_links: String,
    youtube_links: String,
    status: &'a str,
}

pub fn write_company_records(
    path: impl AsRef<Path>,
    records: &[CompanyRecord],
) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;

    for record in records {
        writer
            .serialize(CompanyRecordOut {
                company_id: &record.company_id,
                website: &record.website,
                domain: &record.domain,
                company_commercial_name: &record.company_commercial_name,
                company_legal_name: &record.company_legal_name,
                company_all_names: &record.company_all_names,
                phones: list_literal(&record.phones),
                phones_normalized: list_literal(&record.phones_normalized),
                addresses: list_literal(&record.addresses),
                facebook_links: list_literal(&record.facebook_links),
                facebook_links_normalized: list_literal(&record.facebook_links_normalized),
                twitter_links: list_literal(&record.twitter_links),
                instagram_links: list_literal(&record.instagram_links),
                linkedin_links: list_literal(&record.linkedin_links),
                youtube_links: list_literal(&record.youtube_links),
                status: &record.status,
            })
            .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;
    Ok(())
}

#[derive(Serialize)]
struct MatchResultRow<'a> {
    input_name: &'a str,
    input_website: &'a str,
    input_phone: &'a str,
    input_facebook: &'a str,
    matched: bool,
    company_id: &'a str,
    company_commercial_name: &'a str,
    domain: &'a str,
    match_score: f64,
}

/// Writes one row per `(input, match)` pair, matching the shape of the
/// `/api/bulk-match` and `/api/process-csv` result lists when rendered as CSV.
pub fn write_match_results(
    path: impl AsRef<Path>,
    rows: &[(crate::api_input::ApiInputRow, Option<corpfinder_core::MatchResult>)],
) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;

    for (input, matched) in rows {
        let row = match matched {
            Some(m) => MatchResultRow {
                input_name: &input.name,
                input_website: &input.website,
                input_phone: &input.phone,
                input_facebook: &input.facebook,
                matched: true,
                company_id: &m.record.company_id,
                company_commercial_name: &m.record.company_commercial_name,
                domain: &m.record.domain,
                match_score: m.match_score,
            },
            None => MatchResultRow {
                input_name: &input.name,
                input_website: &input.website,
                input_phone: &input.phone,
                input_facebook: &input.facebook,
                matched: false,
                company_id: "",
                company_commercial_name: "",
                domain: "",
                match_score: 0.0,
            },
        };
        writer
            .serialize(row)
            .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| DatasetError::Csv(path.display().to_string(), e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_literal_round_trips_through_parse() {
        let rendered = list_literal(&["a".to_string(), "b".to_string()]);
        assert_eq!(rendered, "['a', 'b']");
        assert_eq!(
            crate::listparse::parse_string_list(&rendered),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn write_scraped_rows_round_trips_through_load_scraped_rows() {
        let rows = vec![ScrapedRow {
            website: "http://acme.com".to_string(),
            domain: "acme.com".to_string(),
            status: corpfinder_core::ScrapeStatus::Success,
            phones: vec!["+14155550123".to_string(), "6285559999".to_string()],
            addresses: vec!["123 Main Street, Springfield, IL 62704".to_string()],
            facebook_links: vec!["facebook.com/acme".to_string()],
            twitter_links: vec!["twitter.com/acme_hq".to_string()],
            instagram_links: vec![],
            linkedin_links: vec!["linkedin.com/company/acme".to_string()],
            youtube_links: vec![],
            retries: 1,
            error: None,
        }];

        let temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write_scraped_rows(temp_file.path(), &rows).unwrap();

        let raw = crate::csv_io::load_scraped_rows(temp_file.path()).unwrap();

        assert_eq!(raw.len(), 1);
        let loaded = &raw[0];
        assert_eq!(loaded.website, rows[0].website);
        assert_eq!(loaded.domain, rows[0].domain);
        assert_eq!(crate::listparse::parse_string_list(&loaded.phones), rows[0].phones);
        assert_eq!(crate::listparse::parse_string_list(&loaded.addresses), rows[0].addresses);
        assert_eq!(
            crate::listparse::parse_string_list(&loaded.facebook_links),
            rows[0].facebook_links
        );
        assert_eq!(
            crate::listparse::parse_string_list(&loaded.twitter_links),
            rows[0].twitter_links
        );
        assert_eq!(
            crate::listparse::parse_string_list(&loaded.instagram_links),
            rows[0].instagram_links
        );
        assert_eq!(
            crate::listparse::parse_string_list(&loaded.linkedin_links),
            rows[0].linkedin_links
        );
        assert_eq!(
            crate::listparse::parse_string_list(&loaded.youtube_links),
            rows[0].youtube_links
        );
    }
}
