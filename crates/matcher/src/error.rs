use thiserror::Error;

use corpfinder_index::IndexError;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error(transparent)]
    Index(#[from] IndexError),
}
