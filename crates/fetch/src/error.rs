use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("timeout after {0}s")]
    Timeout(u64),

    #[error("tls error: {0}")]
    Tls(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("insufficient content ({len} bytes, need > {threshold})")]
    InsufficientContent { len: usize, threshold: usize },

    #[error("body too large: {size} bytes (max {max})")]
    BodyTooLarge { size: usize, max: usize },
}
