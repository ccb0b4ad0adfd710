use serde::{Deserialize, Serialize};

use crate::cache::CacheStatus;
use crate::guard::{GuardDecision, Violation};

/// An approved answer, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub answer: String,
    /// Ids of the retrieved passages, in rank order.
    pub sources: Vec<String>,
    pub confidence: f32,
    pub citations_found: usize,
}

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum RefusalKind {
    /// Retrieval found no passage with a positive score.
    NoResults,
    /// The guard rejected the draft.
    Guard(Violation),
}

/// A deliberate negative outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Refusal {
    pub kind: RefusalKind,
    pub reason: String,
    pub confidence: f32,
    pub citations_found: usize,
}

/// Reason reported when retrieval comes back empty.
pub const NO_RESULTS_REASON: &str = "no results: no relevant policy documents found for your query";

impl Refusal {
    pub fn no_results() -> Self {
        Self {
            kind: RefusalKind::NoResults,
            reason: NO_RESULTS_REASON.to_string(),
            confidence: 0.0,
            citations_found: 0,
        }
    }

    /// Builds a refusal from a rejected guard decision.
    pub fn from_decision(decision: GuardDecision) -> Self {
        let kind = match decision.violation {
            Some(violation) => RefusalKind::Guard(violation),
            None => RefusalKind::NoResults,
        };
        Self {
            kind,
            reason: decision.reason,
            confidence: decision.confidence,
            citations_found: decision.citations_found,
        }
    }

    /// Stable label for metrics and error bodies.
    pub fn code(&self) -> &'static str {
        match &self.kind {
            RefusalKind::NoResults => "no_results",
            RefusalKind::Guard(violation) => violation.code(),
        }
    }
}

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Cached(AnswerRecord),
    Fresh(AnswerRecord),
    Refused(Refusal),
}

impl Outcome {
    pub fn is_refused(&self) -> bool {
        matches!(self, Outcome::Refused(_))
    }

    pub fn record(&self) -> Option<&AnswerRecord> {
        match self {
            Outcome::Cached(record) | Outcome::Fresh(record) => Some(record),
            Outcome::Refused(_) => None,
        }
    }

    /// How the cache took part, given whether caching is enabled.
    pub fn cache_status(&self, cache_enabled: bool) -> CacheStatus {
        match self {
            Outcome::Cached(_) => CacheStatus::Hit,
            _ if cache_enabled => CacheStatus::Miss,
            _ => CacheStatus::Bypass,
        }
    }

    /// Caller-facing body for a successful outcome; refusals are handed back unchanged.
    pub fn into_response(self) -> Result<AnswerResponse, Refusal> {
        match self {
            Outcome::Cached(record) => Ok(AnswerResponse::from_record(record, true)),
            Outcome::Fresh(record) => Ok(AnswerResponse::from_record(record, false)),
            Outcome::Refused(refusal) => Err(refusal),
        }
    }
}

/// Serialized success result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub sources: Vec<String>,
    pub confidence: f32,
    pub citations_found: usize,
    pub cached: bool,
}

impl AnswerResponse {
    pub fn from_record(record: AnswerRecord, cached: bool) -> Self {
        Self {
            answer: record.answer,
            sources: record.sources,
            confidence: record.confidence,
            citations_found: record.citations_found,
            cached,
        }
    }
}
