pub mod error;
pub mod es;
pub mod index_trait;
pub mod schema;

pub use error::IndexError;
pub use es::ElasticsearchIndex;
pub use index_trait::{BulkOutcome, FieldBoost, Index, ScoredHit};
pub use schema::default_schema;
