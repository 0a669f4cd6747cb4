use std::path::Path;

use serde::Deserialize;

use crate::error::DatasetError;
use crate::listparse::parse_string_list;

/// Raw row as it appears in `scraped_company_data.csv`: list-valued columns
/// are stringified list literals, not real CSV list columns.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScrapedRow {
    pub website: String,
    pub domain: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub phones: String,
    #[serde(default)]
    pub addresses: String,
    #[serde(default)]
    pub facebook_links: String,
    #[serde(default)]
    pub twitter_links: String,
    #[serde(default)]
    pub instagram_links: String,
    #[serde(default)]
    pub linkedin_links: String,
    #[serde(default)]
    pub youtube_links: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNameRow {
    pub domain: String,
    #[serde(default)]
    pub company_commercial_name: String,
    #[serde(default)]
    pub company_legal_name: String,
    #[serde(default)]
    pub company_all_available_names: String,
}

pub fn load_scraped_rows(path: impl AsRef<Path>) -> Result<Vec<RawScrapedRow>, DatasetError> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .map_err(|e| DatasetError::Csv(path.as_ref().display().to_string(), e.to_string()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<RawScrapedRow>, csv::Error>>()
        .map_err(|e| DatasetError::Csv(path.as_ref().display().to_string(), e.to_string()))
}

pub fn load_name_rows(path: impl AsRef<Path>) -> Result<Vec<RawNameRow>, DatasetError> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .map_err(|e| DatasetError::Csv(path.as_ref().display().to_string(), e.to_string()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<RawNameRow>, csv::Error>>()
        .map_err(|e| DatasetError::Csv(path.as_ref().display().to_string(), e.to_string()))
}

pub fn list_field(raw: &str) -> Vec<String> {
    parse_string_list(raw)
}
