use std::path::Path;

use corpfinder_core::Query;
use serde::Deserialize;

use crate::error::DatasetError;

/// A row of `API-input-sample.csv`. Any subset of fields may be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInputRow {
    #[serde(rename = "input name", default)]
    pub name: String,
    #[serde(rename = "input website", default)]
    pub website: String,
    #[serde(rename = "input phone", default)]
    pub phone: String,
    #[serde(rename = "input_facebook", default)]
    pub facebook: String,
}

impl From<&ApiInputRow> for Query {
    fn from(row: &ApiInputRow) -> Self {
        let present = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_string());
        Query {
            name: present(&row.name),
            website: present(&row.website),
            phone: present(&row.phone),
            facebook: present(&row.facebook),
        }
    }
}

pub fn load_api_input_rows(path: impl AsRef<Path>) -> Result<Vec<ApiInputRow>, DatasetError> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .map_err(|e| DatasetError::Csv(path.as_ref().display().to_string(), e.to_string()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<ApiInputRow>, csv::Error>>()
        .map_err(|e| DatasetError::Csv(path.as_ref().display().to_string(), e.to_string()))
}
