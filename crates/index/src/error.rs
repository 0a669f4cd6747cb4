use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("elasticsearch transport error: {0}")]
    Transport(String),

    #[error("elasticsearch returned status {0}: {1}")]
    Status(u16, String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}
