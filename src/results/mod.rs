//! Result sets and the merge stage
//!
//! The merger is the last of the three pipeline stages and the only place
//! where per-field result sets are combined. It is a pure function over the
//! executor's output: result sets are visited in field-query order, empty
//! ones are skipped on their total-hit count, and the rest contribute their
//! documents in backend order.

use serde::{Deserialize, Serialize};

use crate::model::FileDocument;

/// One backend hit. The score is whatever the backend assigned; it is
/// carried for diagnostics but never used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub score: Option<f64>,
    pub document: FileDocument,
}

/// The backend's response to one field query.
///
/// `total_hits == 0` implies `hits` is empty; the count is the signal the
/// merger filters on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub total_hits: u64,
    pub hits: Vec<SearchHit>,
}

impl ResultSet {
    pub fn empty() -> Self {
        Self {
            total_hits: 0,
            hits: Vec::new(),
        }
    }

    pub fn has_hits(&self) -> bool {
        self.total_hits > 0
    }
}

/// Flatten per-field result sets into one ordered document list.
///
/// Output order is field-query order, then within-query hit order; stable
/// across repeated calls with identical backend state. A document matching
/// several fields appears once per matching field, in field order. No
/// deduplication happens here.
pub fn merge(result_sets: Vec<ResultSet>) -> Vec<FileDocument> {
    result_sets
        .into_iter()
        .filter(ResultSet::has_hits)
        .flat_map(|set| set.hits.into_iter().map(|hit| hit.document))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str) -> FileDocument {
        FileDocument::new(id, format!("{id}.txt"))
    }

    fn set(docs: &[&FileDocument]) -> ResultSet {
        ResultSet {
            total_hits: docs.len() as u64,
            hits: docs
                .iter()
                .map(|d| SearchHit {
                    id: d.id.clone(),
                    score: Some(1.0),
                    document: (*d).clone(),
                })
                .collect(),
        }
    }

    #[test]
    fn merge_preserves_field_then_hit_order() {
        let d1 = doc("1");
        let d2 = doc("2");
        let d3 = doc("3");

        let merged = merge(vec![
            ResultSet::empty(),
            set(&[&d1, &d2]),
            ResultSet::empty(),
            set(&[&d3]),
        ]);

        assert_eq!(merged, vec![d1, d2, d3]);
    }

    #[test]
    fn merge_keeps_cross_field_duplicates() {
        let d1 = doc("1");

        let merged = merge(vec![set(&[&d1]), set(&[&d1])]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], merged[1]);
    }

    #[test]
    fn all_empty_sets_merge_to_nothing() {
        let merged = merge(vec![ResultSet::empty(), ResultSet::empty()]);
        assert!(merged.is_empty());
    }

    #[test]
    fn empty_input_merges_to_nothing() {
        assert!(merge(Vec::new()).is_empty());
    }
}
