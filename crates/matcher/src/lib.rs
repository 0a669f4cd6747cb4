pub mod error;
mod scoreboard;

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use corpfinder_core::{MatchResult, Query};
use corpfinder_index::{FieldBoost, Index};
use corpfinder_signals::normalize;

pub use error::MatcherError;
use scoreboard::ScoreBoard;

const NAME_FIELDS: [&str; 3] = [
    "company_commercial_name",
    "company_legal_name",
    "company_all_names",
];

/// Gathers candidates for a query across the domain/phone/facebook/name
/// probes (falling back to a fuzzy multi-match when all four come up dry),
/// additively scores them, and returns the highest-scored record. Holds no
/// mutable state beyond a handle to the index.
pub struct Matcher {
    index: Arc<dyn Index>,
    index_name: String,
}

impl Matcher {
    pub fn new(index: Arc<dyn Index>, index_name: impl Into<String>) -> Self {
        Self {
            index,
            index_name: index_name.into(),
        }
    }

    /// Reports the backing store's document count for `index_name`, or
    /// `None` if the index does not exist yet. Used for the startup status
    /// report; a store that is unreachable surfaces as `Err`.
    pub async fn index_report(&self, index_name: &str) -> Result<Option<u64>, MatcherError> {
        if !self.index.exists(index_name).await? {
            return Ok(None);
        }
        Ok(Some(self.index.count(index_name).await?))
    }

    pub async fn match_query(&self, query: &Query) -> Result<Option<MatchResult>, MatcherError> {
        let mut board = ScoreBoard::default();

        self.domain_probe(query, &mut board).await?;
        self.phone_probe(query, &mut board).await?;
        self.facebook_probe(query, &mut board).await?;
        self.name_probe(query, &mut board).await?;

        if board.is_empty() {
            self.fallback_probe(query, &mut board).await?;
        }

        Ok(board.winner().map(|(record, match_score)| MatchResult { record, match_score }))
    }

    async fn domain_probe(&self, query: &Query, board: &mut ScoreBoard) -> Result<(), MatcherError> {
        let Some(website) = &query.website else { return Ok(()) };
        let Some(domain) = normalize::domain(website) else { return Ok(()) };

        let hits = self
            .index
            .term_query(&self.index_name, "domain", &domain, 5)
            .await?;
        debug!(domain, hits = hits.len(), "domain probe");
        for hit in hits {
            board.add(hit.record, 10.0);
        }
        Ok(())
    }

    async fn phone_probe(&self, query: &Query, board: &mut ScoreBoard) -> Result<(), MatcherError> {
        let Some(phone) = &query.phone else { return Ok(()) };
        let Some(normalized) = normalize::phone(phone) else { return Ok(()) };

        let hits = self
            .index
            .match_query(&self.index_name, "phones_normalized", &normalized, 5)
            .await?;
        debug!(hits = hits.len(), "phone probe");
        for hit in hits {
            board.add(hit.record, 8.0);
        }
        Ok(())
    }

    async fn facebook_probe(&self, query: &Query, board: &mut ScoreBoard) -> Result<(), MatcherError> {
        let Some(facebook) = &query.facebook else { return Ok(()) };
        let Some(handle) = normalize::facebook(facebook) else { return Ok(()) };

        let hits = self
            .index
            .match_query(&self.index_name, "facebook_links_normalized", &handle, 5)
            .await?;
        debug!(hits = hits.len(), "facebook probe");
        for hit in hits {
            board.add(hit.record, 6.0);
        }
        Ok(())
    }

    async fn name_probe(&self, query: &Query, board: &mut ScoreBoard) -> Result<(), MatcherError> {
        let Some(name) = &query.name else { return Ok(()) };

        let subqueries: Vec<_> = NAME_FIELDS
            .iter()
            .map(|field| json!({ "match": { *field: { "query": name, "fuzziness": "AUTO" } } }))
            .collect();

        let hits = self
            .index
            .bool_should(&self.index_name, subqueries, 10)
            .await?;
        debug!(hits = hits.len(), "name probe");

        let name_lower = name.to_lowercase();
        for hit in hits {
            let s = [&hit.record.company_commercial_name, &hit.record.company_legal_name]
                .into_iter()
                .map(|field| name_similarity(&name_lower, &field.to_lowercase()))
                .fold(0.0_f64, f64::max);
            board.add(hit.record, s * 5.0);
        }
        Ok(())
    }

    async fn fallback_probe(&self, query: &Query, board: &mut ScoreBoard) -> Result<(), MatcherError> {
        let mut parts = Vec::new();
        if let Some(name) = &query.name {
            parts.push(name.clone());
        }
        if let Some(website) = &query.website {
            parts.push(website.clone());
        }
        if let Some(phone) = &query.phone {
            parts.push(phone.clone());
        }
        if let Some(facebook) = &query.facebook {
            parts.push(facebook.clone());
        }
        if parts.is_empty() {
            return Ok(());
        }
        let query_string = parts.join(" ");

        let boosts: &[FieldBoost] = &[
            ("company_commercial_name", 3.0),
            ("company_legal_name", 2.0),
            ("company_all_names", 1.0),
            ("website", 1.0),
            ("phones", 1.0),
            ("facebook_links", 1.0),
        ];

        let hits = self
            .index
            .fuzzy_multi_match(&self.index_name, boosts, &query_string, 10)
            .await?;
        debug!(hits = hits.len(), "fallback probe");
        for hit in hits {
            let score = hit.score;
            board.add(hit.record, score / 10.0);
        }
        Ok(())
    }
}

fn name_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let distance = strsim::levenshtein(a, b) as f64;
    let max_len = a.chars().count().max(b.chars().count()) as f64;
    if max_len == 0.0 {
        0.0
    } else {
        (1.0 - distance / max_len).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use corpfinder_core::CompanyRecord;
    use corpfinder_index::{BulkOutcome, IndexError, ScoredHit};
    use serde_json::Value;

    fn record(id: &str, domain: &str, commercial: &str) -> CompanyRecord {
        CompanyRecord {
            company_id: id.to_string(),
            website: format!("http://{domain}"),
            domain: domain.to_string(),
            company_commercial_name: commercial.to_string(),
            company_legal_name: commercial.to_string(),
            company_all_names: commercial.to_string(),
            phones: vec![],
            phones_normalized: vec![],
            addresses: vec![],
            facebook_links: vec![],
            facebook_links_normalized: vec![],
            twitter_links: vec![],
            instagram_links: vec![],
            linkedin_links: vec![],
            youtube_links: vec![],
            status: "success".to_string(),
        }
    }

    /// In-memory fake backing store: `term_query`/`match_query` do an exact
    /// match on the named field; `bool_should` OR-matches across the name
    /// fields; `fuzzy_multi_match` substring-matches across all fields.
    #[derive(Default)]
    struct FakeIndex {
        records: Vec<CompanyRecord>,
    }

    fn field_value(record: &CompanyRecord, field: &str) -> Vec<String> {
        match field {
            "domain" => vec![record.domain.clone()],
            "phones_normalized" => record.phones_normalized.clone(),
            "facebook_links_normalized" => record.facebook_links_normalized.clone(),
            "company_commercial_name" => vec![record.company_commercial_name.clone()],
            "company_legal_name" => vec![record.company_legal_name.clone()],
            "company_all_names" => vec![record.company_all_names.clone()],
            "website" => vec![record.website.clone()],
            "phones" => record.phones.clone(),
            "facebook_links" => record.facebook_links.clone(),
            _ => vec![],
        }
    }

    #[async_trait]
    impl Index for FakeIndex {
        async fn create_or_replace(&self, _index_name: &str, _schema: Value) -> Result<(), IndexError> {
            Ok(())
        }
        async fn bulk_load(
            &self,
            _index_name: &str,
            _records: &[CompanyRecord],
            _chunk_size: usize,
        ) -> Result<BulkOutcome, IndexError> {
            Ok(BulkOutcome::default())
        }
        async fn refresh(&self, _index_name: &str) -> Result<(), IndexError> {
            Ok(())
        }
        async fn count(&self, _index_name: &str) -> Result<u64, IndexError> {
            Ok(self.records.len() as u64)
        }
        async fn exists(&self, _index_name: &str) -> Result<bool, IndexError> {
            Ok(true)
        }
        async fn term_query(
            &self,
            _index_name: &str,
            field: &str,
            value: &str,
            size: usize,
        ) -> Result<Vec<ScoredHit>, IndexError> {
            Ok(self
                .records
                .iter()
                .filter(|r| field_value(r, field).iter().any(|v| v == value))
                .take(size)
                .map(|r| ScoredHit { record: r.clone(), score: 1.0 })
                .collect())
        }
        async fn match_query(
            &self,
            index_name: &str,
            field: &str,
            value: &str,
            size: usize,
        ) -> Result<Vec<ScoredHit>, IndexError> {
            self.term_query(index_name, field, value, size).await
        }
        async fn fuzzy_multi_match(
            &self,
            _index_name: &str,
            fields_with_boosts: &[corpfinder_index::FieldBoost<'_>],
            value: &str,
            size: usize,
        ) -> Result<Vec<ScoredHit>, IndexError> {
            let needle = value.to_lowercase();
            Ok(self
                .records
                .iter()
                .filter(|r| {
                    fields_with_boosts
                        .iter()
                        .any(|(field, _)| field_value(r, field).iter().any(|v| v.to_lowercase().contains(&needle)))
                })
                .take(size)
                .map(|r| ScoredHit { record: r.clone(), score: 10.0 })
                .collect())
        }
        async fn bool_should(
            &self,
            _index_name: &str,
            subqueries: Vec<Value>,
            size: usize,
        ) -> Result<Vec<ScoredHit>, IndexError> {
            let fields: Vec<(String, String)> = subqueries
                .iter()
                .filter_map(|q| {
                    let inner = q.get("match")?.as_object()?;
                    let (field, spec) = inner.iter().next()?;
                    let query = spec.get("query")?.as_str()?;
                    Some((field.clone(), query.to_lowercase()))
                })
                .collect();

            Ok(self
                .records
                .iter()
                .filter(|r| {
                    fields
                        .iter()
                        .any(|(field, query)| field_value(r, field).iter().any(|v| v.to_lowercase() == *query))
                })
                .take(size)
                .map(|r| ScoredHit { record: r.clone(), score: 1.0 })
                .collect())
        }
    }

    #[tokio::test]
    async fn domain_match_wins_outright() {
        let index = Arc::new(FakeIndex {
            records: vec![record("0", "acme.com", "Acme Inc"), record("1", "other.com", "Other Co")],
        });
        let matcher = Matcher::new(index, "company_profiles");

        let query = Query {
            website: Some("https://acme.com/about".to_string()),
            ..Default::default()
        };
        let result = matcher.match_query(&query).await.unwrap().unwrap();
        assert_eq!(result.record.company_id, "0");
        assert_eq!(result.match_score, 10.0);
    }

    #[tokio::test]
    async fn name_probe_scores_by_similarity() {
        let index = Arc::new(FakeIndex {
            records: vec![record("0", "acme.com", "Acme Incorporated")],
        });
        let matcher = Matcher::new(index, "company_profiles");

        let query = Query {
            name: Some("Acme Incorporated".to_string()),
            ..Default::default()
        };
        let result = matcher.match_query(&query).await.unwrap().unwrap();
        assert_eq!(result.match_score, 5.0);
    }

    #[tokio::test]
    async fn empty_query_yields_no_match() {
        let index = Arc::new(FakeIndex {
            records: vec![record("0", "acme.com", "Acme Inc")],
        });
        let matcher = Matcher::new(index, "company_profiles");
        let result = matcher.match_query(&Query::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fallback_probe_runs_only_when_primary_probes_are_dry() {
        let index = Arc::new(FakeIndex {
            records: vec![record("0", "acme.com", "Acme Inc")],
        });
        let matcher = Matcher::new(index, "company_profiles");

        let query = Query {
            name: Some("zzz-no-match".to_string()),
            website: Some("http://acme.com".to_string()),
            ..Default::default()
        };
        // domain probe matches outright; fallback must not also run and
        // double-count the candidate.
        let result = matcher.match_query(&query).await.unwrap().unwrap();
        assert_eq!(result.match_score, 10.0);
    }

    #[test]
    fn scoreboard_breaks_ties_by_insertion_order() {
        let mut board = ScoreBoard::default();
        board.add(record("1", "b.com", "B"), 5.0);
        board.add(record("0", "a.com", "A"), 5.0);
        let (winner, score) = board.winner().unwrap();
        assert_eq!(winner.company_id, "1");
        assert_eq!(score, 5.0);
    }
}
