use std::collections::HashMap;

use corpfinder_core::CompanyRecord;

/// Accumulates additive per-candidate scores in probe insertion order, so
/// ties are broken by which candidate was seen first.
#[derive(Default)]
pub struct ScoreBoard {
    order: Vec<String>,
    scores: HashMap<String, f64>,
    records: HashMap<String, CompanyRecord>,
}

impl ScoreBoard {
    pub fn add(&mut self, record: CompanyRecord, delta: f64) {
        let id = record.company_id.clone();
        if !self.scores.contains_key(&id) {
            self.order.push(id.clone());
            self.records.insert(id.clone(), record);
        }
        *self.scores.entry(id).or_insert(0.0) += delta;
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The winning candidate: highest total score, earliest insertion wins ties.
    pub fn winner(self) -> Option<(CompanyRecord, f64)> {
        let mut best: Option<(String, f64)> = None;
        for id in &self.order {
            let score = self.scores[id];
            match &best {
                Some((_, best_score)) if score <= *best_score => {}
                _ => best = Some((id.clone(), score)),
            }
        }
        let (id, score) = best?;
        let mut records = self.records;
        records.remove(&id).map(|record| (record, score))
    }
}
