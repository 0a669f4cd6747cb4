use async_trait::async_trait;
use elasticsearch::{
    http::transport::Transport,
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    BulkOperation, BulkParts, CountParts, Elasticsearch, IndexParts, SearchParts,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use corpfinder_core::{config::ElasticsearchConfig, CompanyRecord};

use crate::error::IndexError;
use crate::index_trait::{BulkOutcome, FieldBoost, Index, ScoredHit};

pub struct ElasticsearchIndex {
    client: Elasticsearch,
}

impl ElasticsearchIndex {
    pub fn new(config: &ElasticsearchConfig) -> Result<Self, IndexError> {
        let transport = Transport::single_node(&config.url_with_credentials())
            .map_err(|e| IndexError::Transport(e.to_string()))?;
        Ok(Self {
            client: Elasticsearch::new(transport),
        })
    }

    async fn search(
        &self,
        index_name: &str,
        body: Value,
    ) -> Result<Vec<ScoredHit>, IndexError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index_name]))
            .body(body)
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(IndexError::Status(
                response.status_code().as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| IndexError::Decode(e.to_string()))?;

        let hits = parsed["hits"]["hits"].as_array().cloned().unwrap_or_default();
        let mut scored = Vec::with_capacity(hits.len());
        for hit in hits {
            let score = hit["_score"].as_f64().unwrap_or(0.0);
            let source = hit["_source"].clone();
            match serde_json::from_value::<CompanyRecord>(source) {
                Ok(record) => scored.push(ScoredHit { record, score }),
                Err(e) => warn!(error = %e, "skipping hit with undecodable source"),
            }
        }
        Ok(scored)
    }
}

#[async_trait]
impl Index for ElasticsearchIndex {
    async fn create_or_replace(&self, index_name: &str, schema: Value) -> Result<(), IndexError> {
        if self.exists(index_name).await? {
            info!(index_name, "index exists, deleting before recreate");
            self.client
                .indices()
                .delete(IndicesDeleteParts::Index(&[index_name]))
                .send()
                .await
                .map_err(|e| IndexError::Transport(e.to_string()))?;
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index_name))
            .body(schema)
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(IndexError::Status(
                response.status_code().as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }
        info!(index_name, "created index");
        Ok(())
    }

    async fn bulk_load(
        &self,
        index_name: &str,
        records: &[CompanyRecord],
        chunk_size: usize,
    ) -> Result<BulkOutcome, IndexError> {
        let chunk_size = chunk_size.max(1);
        let mut outcome = BulkOutcome::default();

        for chunk in records.chunks(chunk_size) {
            let ops: Vec<BulkOperation<&CompanyRecord>> = chunk
                .iter()
                .map(|record| BulkOperation::index(record).id(record.company_id.clone()).into())
                .collect();

            match self
                .client
                .bulk(BulkParts::Index(index_name))
                .body(ops)
                .send()
                .await
            {
                Ok(response) if response.status_code().is_success() => {
                    let parsed: Value = response
                        .json()
                        .await
                        .map_err(|e| IndexError::Decode(e.to_string()))?;
                    tally_bulk_response(&parsed, &mut outcome);
                }
                Ok(response) => {
                    let body = response.text().await.unwrap_or_default();
                    warn!(index_name, body, "bulk request returned non-success status, falling back to per-document inserts");
                    self.insert_individually(index_name, chunk, &mut outcome).await;
                }
                Err(e) => {
                    warn!(index_name, error = %e, "bulk request failed, falling back to per-document inserts");
                    self.insert_individually(index_name, chunk, &mut outcome).await;
                }
            }
        }

        Ok(outcome)
    }

    async fn refresh(&self, index_name: &str) -> Result<(), IndexError> {
        self.client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index_name]))
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn count(&self, index_name: &str) -> Result<u64, IndexError> {
        let response = self
            .client
            .count(CountParts::Index(&[index_name]))
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;
        let parsed: Value = response
            .json()
            .await
            .map_err(|e| IndexError::Decode(e.to_string()))?;
        Ok(parsed["count"].as_u64().unwrap_or(0))
    }

    async fn exists(&self, index_name: &str) -> Result<bool, IndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index_name]))
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;
        Ok(response.status_code().as_u16() == 200)
    }

    async fn term_query(
        &self,
        index_name: &str,
        field: &str,
        value: &str,
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError> {
        self.search(
            index_name,
            json!({ "query": { "term": { field: value } }, "size": size }),
        )
        .await
    }

    async fn match_query(
        &self,
        index_name: &str,
        field: &str,
        value: &str,
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError> {
        self.search(
            index_name,
            json!({ "query": { "match": { field: value } }, "size": size }),
        )
        .await
    }

    async fn fuzzy_multi_match(
        &self,
        index_name: &str,
        fields_with_boosts: &[FieldBoost<'_>],
        value: &str,
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError> {
        let fields: Vec<String> = fields_with_boosts
            .iter()
            .map(|(field, boost)| {
                if *boost == 1.0 {
                    field.to_string()
                } else {
                    format!("{}^{}", field, boost)
                }
            })
            .collect();

        self.search(
            index_name,
            json!({
                "query": {
                    "multi_match": {
                        "query": value,
                        "fields": fields,
                        "type": "best_fields",
                        "fuzziness": "AUTO"
                    }
                },
                "size": size
            }),
        )
        .await
    }

    async fn bool_should(
        &self,
        index_name: &str,
        subqueries: Vec<Value>,
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError> {
        self.search(
            index_name,
            json!({ "query": { "bool": { "should": subqueries } }, "size": size }),
        )
        .await
    }
}

impl ElasticsearchIndex {
    async fn insert_individually(&self, index_name: &str, chunk: &[CompanyRecord], outcome: &mut BulkOutcome) {
        for record in chunk {
            let doc = match serde_json::to_value(record) {
                Ok(v) => v,
                Err(e) => {
                    outcome.errors.push(e.to_string());
                    continue;
                }
            };
            let result = self
                .client
                .index(IndexParts::IndexId(index_name, &record.company_id))
                .body(doc)
                .send()
                .await;
            match result {
                Ok(response) if response.status_code().is_success() => outcome.success_count += 1,
                Ok(response) => outcome
                    .errors
                    .push(format!("{}: {}", record.company_id, response.status_code())),
                Err(e) => outcome.errors.push(format!("{}: {}", record.company_id, e)),
            }
        }
    }
}

fn tally_bulk_response(parsed: &Value, outcome: &mut BulkOutcome) {
    let items = parsed["items"].as_array().cloned().unwrap_or_default();
    for item in items {
        let Some(op) = item.as_object().and_then(|o| o.values().next()) else {
            continue;
        };
        if op.get("error").is_some() {
            outcome.errors.push(op["error"].to_string());
        } else {
            outcome.success_count += 1;
        }
    }
}
