//! Lexical passage retrieval.
//!
//! Ranking is a cheap, explainable keyword score (see [`score`]); there is no embedding or
//! semantic component. Scoring never blocks on I/O.

pub mod scorer;


pub use scorer::score;

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::corpus::{Corpus, Passage};

/// A passage paired with its relevance score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPassage {
    pub passage: Passage,
    pub score: f32,
}

/// Ranks [`Corpus`] passages against a query.
#[derive(Debug, Clone)]
pub struct Retriever {
    corpus: Arc<Corpus>,
}

impl Retriever {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    /// Returns at most `top_k` passages with a positive score, best first.
    ///
    /// Equal scores keep corpus insertion order. An empty or whitespace-only query yields no
    /// results rather than an error.
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<ScoredPassage> {
        if query.trim().is_empty() {
            warn!("Empty query received");
            return Vec::new();
        }

        debug!(query_len = query.len(), top_k, "Searching corpus");

        let results = self.corpus.scan(|passages| {
            let mut scored: Vec<(f32, &Passage)> = passages
                .iter()
                .map(|p| (score(query, p.text()), p))
                .filter(|(s, _)| *s > 0.0)
                .collect();

            // `sort_by` is stable, so ties stay in insertion order.
            scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
            scored.truncate(top_k);

            scored
                .into_iter()
                .map(|(score, passage)| ScoredPassage {
                    passage: passage.clone(),
                    score,
                })
                .collect::<Vec<_>>()
        });

        info!(
            results = results.len(),
            query_len = query.len(),
            top_k,
            "Search complete"
        );

        results
    }

    /// Like [`rank`](Self::rank) but drops the scores.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<Passage> {
        self.rank(query, top_k)
            .into_iter()
            .map(|scored| scored.passage)
            .collect()
    }
}
