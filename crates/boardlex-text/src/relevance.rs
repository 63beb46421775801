//! TF-IDF relevance of each document's terms against the whole corpus.
//!
//! - `tf(t, d) = count(t, d) / |d|`
//! - `df(t)` = number of documents containing `t` at least once
//! - `idf(t) = ln(N / (1 + df(t)))`
//!
//! The `+1` keeps the score finite. A term present in every document gets a
//! negative idf, which is expected.

use serde::Serialize;
use std::collections::HashMap;

use crate::frequency::{frequency, FrequencyTable};

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermScore {
    pub term: String,
    pub score: f64,
}

/// Scores of one document, in first-occurrence order of the terms.
///
/// Only terms that occur in the document have a score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RelevanceScore {
    scores: Vec<TermScore>,
}

impl RelevanceScore {
    pub fn get(&self, term: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.term == term).map(|s| s.score)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermScore> {
        self.scores.iter()
    }

    /// Highest `k` scores, descending; ties keep first-occurrence order.
    pub fn top(&self, k: usize) -> Vec<&TermScore> {
        let mut ranked: Vec<&TermScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(k);
        ranked
    }
}

pub fn idf(corpus_size: usize, document_frequency: usize) -> f64 {
    (corpus_size as f64 / (1 + document_frequency) as f64).ln()
}

/// Score every document of `corpus`. The result has one entry per document,
/// in corpus order; an empty document gets an empty score.
pub fn relevance<S: AsRef<str>>(corpus: &[Vec<S>]) -> Vec<RelevanceScore> {
    let counts: Vec<FrequencyTable> = corpus.iter().map(|doc| frequency(doc.as_slice())).collect();

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for table in &counts {
        for entry in table.iter() {
            *document_frequency.entry(entry.term.as_str()).or_insert(0) += 1;
        }
    }

    let corpus_size = corpus.len();
    counts
        .iter()
        .map(|table| {
            let length = table.total();
            if length == 0 {
                return RelevanceScore::default();
            }
            let scores = table
                .iter()
                .map(|entry| {
                    let tf = entry.count as f64 / length as f64;
                    let df = document_frequency.get(entry.term.as_str()).copied().unwrap_or(0);
                    TermScore { term: entry.term.clone(), score: tf * idf(corpus_size, df) }
                })
                .collect();
            RelevanceScore { scores }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_two_document_scenario() {
        let corpus = vec![doc(&["cat", "dog"]), doc(&["cat", "cat"])];
        let scores = relevance(&corpus);
        assert_eq!(scores.len(), 2);

        // df(dog) = 1 → idf = ln(2/2) = 0
        assert_eq!(idf(2, 1), 0.0);
        assert_eq!(scores[0].get("dog"), Some(0.0));
        assert_eq!(scores[1].get("dog"), None, "dog does not occur in the second document");

        // df(cat) = 2 → idf = ln(2/3) < 0
        let expected = (2.0f64 / 3.0).ln();
        assert!(close(scores[0].get("cat").unwrap(), 0.5 * expected));
        assert!(close(scores[1].get("cat").unwrap(), 1.0 * expected));
        assert!(scores[1].get("cat").unwrap() < 0.0);
    }

    #[test]
    fn test_term_in_every_document_is_negative() {
        let corpus = vec![doc(&["common", "alpha"]), doc(&["common", "beta"]), doc(&["common", "gamma"])];
        let scores = relevance(&corpus);
        for score in &scores {
            let value = score.get("common").unwrap();
            assert!(close(value, 0.5 * (3.0f64 / 4.0).ln()));
            assert!(value < 0.0);
        }
    }

    #[test]
    fn test_rare_terms_rank_first() {
        let corpus = vec![
            doc(&["shared", "unique", "shared"]),
            doc(&["shared", "other"]),
            doc(&["filler", "words"]),
        ];
        let scores = relevance(&corpus);
        let top = scores[0].top(1);
        assert_eq!(top[0].term, "unique");
        assert!(top[0].score > 0.0);
    }

    #[test]
    fn test_empty_document_has_no_scores() {
        let corpus = vec![doc(&[]), doc(&["cat"])];
        let scores = relevance(&corpus);
        assert!(scores[0].is_empty());
        // N counts the empty document: idf(cat) = ln(2/2)
        assert_eq!(scores[1].get("cat"), Some(0.0));
    }

    #[test]
    fn test_empty_corpus() {
        let corpus: Vec<Vec<String>> = Vec::new();
        assert!(relevance(&corpus).is_empty());
    }

    #[test]
    fn test_top_ties_keep_first_occurrence() {
        let corpus = vec![doc(&["zeta", "alpha", "mid"]), doc(&["other"]), doc(&["more"])];
        let scores = relevance(&corpus);
        let order: Vec<&str> = scores[0].top(DEFAULT_TOP_K).iter().map(|s| s.term.as_str()).collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
    }
}
