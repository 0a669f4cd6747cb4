use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub pipeline: PipelineConfig,
    pub elasticsearch: ElasticsearchConfig,
    pub browser: BrowserConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    pub request_timeout_seconds: u64,
    pub max_body_size_mb: usize,
    pub wall_clock_limit_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    pub max_concurrency: usize,
    pub retry_count: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ElasticsearchConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub index_name: String,
}

impl ElasticsearchConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// URL with userinfo embedded so a plain `Transport::single_node` picks
    /// up basic auth credentials automatically.
    pub fn url_with_credentials(&self) -> String {
        if self.has_credentials() {
            format!("http://{}:{}@{}:{}", self.username, self.password, self.host, self.port)
        } else {
            self.url()
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BrowserConfig {
    #[serde(default)]
    pub binary_path: Option<String>,
}

/// Apply the documented environment-variable overrides on top of a loaded config.
/// Malformed values are logged and ignored rather than treated as fatal.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(v) = std::env::var("ELASTICSEARCH_HOST") {
        config.elasticsearch.host = v;
    }
    if let Ok(v) = std::env::var("ELASTICSEARCH_PORT") {
        match v.parse::<u16>() {
            Ok(port) => config.elasticsearch.port = port,
            Err(_) => tracing::warn!(value = %v, "ignoring malformed ELASTICSEARCH_PORT"),
        }
    }
    if let Ok(v) = std::env::var("ELASTICSEARCH_USERNAME") {
        config.elasticsearch.username = v;
    }
    if let Ok(v) = std::env::var("ELASTICSEARCH_PASSWORD") {
        config.elasticsearch.password = v;
    }
    if let Ok(v) = std::env::var("CHROME_BINARY_PATH") {
        config.browser.binary_path = Some(v);
    }
}
