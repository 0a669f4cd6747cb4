use serde::{Deserialize, Serialize};

/// A website the pipeline should fetch. Input only, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteTarget {
    pub url: String,
}

/// Status of a single fetch+extract pass over one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    Success,
    Failed,
}

/// One row produced by the pipeline per website target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedRow {
    pub website: String,
    pub domain: String,
    pub status: ScrapeStatus,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub facebook_links: Vec<String>,
    #[serde(default)]
    pub twitter_links: Vec<String>,
    #[serde(default)]
    pub instagram_links: Vec<String>,
    #[serde(default)]
    pub linkedin_links: Vec<String>,
    #[serde(default)]
    pub youtube_links: Vec<String>,
    pub retries: u32,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScrapedRow {
    pub fn failed(website: String, domain: String, retries: u32, error: String) -> Self {
        Self {
            website,
            domain,
            status: ScrapeStatus::Failed,
            phones: Vec::new(),
            addresses: Vec::new(),
            facebook_links: Vec::new(),
            twitter_links: Vec::new(),
            instagram_links: Vec::new(),
            linkedin_links: Vec::new(),
            youtube_links: Vec::new(),
            retries,
            error: Some(error),
        }
    }
}

/// A row from the externally-supplied company name table, joined on `domain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRow {
    pub domain: String,
    pub company_commercial_name: Option<String>,
    pub company_legal_name: Option<String>,
    pub company_all_available_names: Option<String>,
}

/// The canonical, indexable fusion of a scraped row with a name-table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company_id: String,
    pub website: String,
    pub domain: String,
    pub company_commercial_name: String,
    pub company_legal_name: String,
    pub company_all_names: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub phones_normalized: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub facebook_links: Vec<String>,
    #[serde(default)]
    pub facebook_links_normalized: Vec<String>,
    #[serde(default)]
    pub twitter_links: Vec<String>,
    #[serde(default)]
    pub instagram_links: Vec<String>,
    #[serde(default)]
    pub linkedin_links: Vec<String>,
    #[serde(default)]
    pub youtube_links: Vec<String>,
    pub status: String,
}

/// A match request. At least one field must be present (enforced by the service layer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.website.is_none() && self.phone.is_none() && self.facebook.is_none()
    }
}

/// A `CompanyRecord` tagged with the additive score that won it the match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub record: CompanyRecord,
    pub match_score: f64,
}

/// Aggregate statistics the pipeline reports after a run completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineAnalysis {
    pub total_websites: usize,
    pub successful_scrapes: usize,
    pub coverage_percentage: f64,
    pub fill_rates: FillRates,
    pub retry_stats: RetryStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillRates {
    pub phones: f64,
    pub addresses: f64,
    pub facebook_links: f64,
    pub twitter_links: f64,
    pub instagram_links: f64,
    pub linkedin_links: f64,
    pub youtube_links: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryStats {
    pub retried: usize,
    pub avg_retries: f64,
    pub max_retries: u32,
}
