pub mod api_input;
pub mod csv_io;
pub mod csv_out;
pub mod error;
pub mod listparse;
pub mod merge;

pub use api_input::{load_api_input_rows, ApiInputRow};
pub use error::DatasetError;
pub use merge::merge;
