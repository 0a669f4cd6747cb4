use async_trait::async_trait;
use corpfinder_core::CompanyRecord;
use serde_json::Value;

use crate::error::IndexError;

/// A single hit from a query, carrying the store's own relevance score
/// alongside the decoded record.
#[derive(Debug, Clone)]
pub struct ScoredHit {
    pub record: CompanyRecord,
    pub score: f64,
}

/// Outcome of a bulk load: a success count and any per-document errors.
/// Errors never abort the load; `bulk_load` only returns `Err` when the
/// whole batch request itself fails.
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    pub success_count: usize,
    pub errors: Vec<String>,
}

/// A single `(field, boost)` pair for a fuzzy multi-match query.
pub type FieldBoost<'a> = (&'a str, f64);

/// Storage abstraction the matcher and dataset builder depend on. Grounded
/// on the operations the original Elasticsearch-backed matcher performs;
/// any store implementing this contract can back the matcher.
#[async_trait]
pub trait Index: Send + Sync {
    async fn create_or_replace(&self, index_name: &str, schema: Value) -> Result<(), IndexError>;
    async fn bulk_load(
        &self,
        index_name: &str,
        records: &[CompanyRecord],
        chunk_size: usize,
    ) -> Result<BulkOutcome, IndexError>;
    async fn refresh(&self, index_name: &str) -> Result<(), IndexError>;
    async fn count(&self, index_name: &str) -> Result<u64, IndexError>;
    async fn exists(&self, index_name: &str) -> Result<bool, IndexError>;
    async fn term_query(
        &self,
        index_name: &str,
        field: &str,
        value: &str,
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError>;
    async fn match_query(
        &self,
        index_name: &str,
        field: &str,
        value: &str,
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError>;
    async fn fuzzy_multi_match(
        &self,
        index_name: &str,
        fields_with_boosts: &[FieldBoost<'_>],
        value: &str,
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError>;
    async fn bool_should(
        &self,
        index_name: &str,
        subqueries: Vec<Value>,
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError>;
}
