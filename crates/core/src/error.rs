use thiserror::Error;

/// Errors shared across crates that don't warrant their own enum.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
