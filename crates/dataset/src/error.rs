use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read csv {0}: {1}")]
    Csv(String, String),
}
