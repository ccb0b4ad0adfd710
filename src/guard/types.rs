use std::fmt;

use crate::constants::{MAX_DRAFT_CHARS, MIN_DRAFT_CHARS};

/// The first guard gate a draft failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// No passages were supplied to check citations against.
    NoSources,
    /// The draft is empty or whitespace-only.
    EmptyResponse,
    /// The draft cites none of the supplied passages.
    MissingCitations,
    /// The draft is shorter than [`MIN_DRAFT_CHARS`].
    TooShort { chars: usize },
    /// The draft is longer than [`MAX_DRAFT_CHARS`].
    TooLong { chars: usize },
    /// The draft contains a hedging phrase.
    UncertainLanguage { phrase: &'static str },
    /// The confidence score fell below the configured minimum.
    LowConfidence { confidence: f32, threshold: f32 },
}

impl Violation {
    /// Short machine-readable label, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::NoSources => "no_sources",
            Violation::EmptyResponse => "empty_response",
            Violation::MissingCitations => "missing_citations",
            Violation::TooShort { .. } => "too_short",
            Violation::TooLong { .. } => "too_long",
            Violation::UncertainLanguage { .. } => "uncertain_language",
            Violation::LowConfidence { .. } => "low_confidence",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NoSources => write!(f, "no source documents provided"),
            Violation::EmptyResponse => write!(f, "empty response from generator"),
            Violation::MissingCitations => write!(
                f,
                "missing citations: response must reference source documents"
            ),
            Violation::TooShort { chars } => write!(
                f,
                "response too short ({} < {} characters)",
                chars, MIN_DRAFT_CHARS
            ),
            Violation::TooLong { chars } => write!(
                f,
                "response too long ({} > {} characters)",
                chars, MAX_DRAFT_CHARS
            ),
            Violation::UncertainLanguage { phrase } => {
                write!(f, "response contains uncertain language: '{}'", phrase)
            }
            Violation::LowConfidence {
                confidence,
                threshold,
            } => write!(f, "low confidence: {:.2} < {}", confidence, threshold),
        }
    }
}

/// Outcome of validating one draft.
///
/// When `allowed` is false, `answer` is empty and `reason` explains why.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardDecision {
    pub allowed: bool,
    pub answer: String,
    pub reason: String,
    pub confidence: f32,
    pub citations_found: usize,
    pub citations_expected: usize,
    pub violation: Option<Violation>,
}

impl GuardDecision {
    pub(crate) fn approve(
        answer: String,
        confidence: f32,
        citations_found: usize,
        citations_expected: usize,
    ) -> Self {
        Self {
            allowed: true,
            answer,
            reason: String::new(),
            confidence,
            citations_found,
            citations_expected,
            violation: None,
        }
    }

    pub(crate) fn refuse(
        violation: Violation,
        confidence: f32,
        citations_found: usize,
        citations_expected: usize,
    ) -> Self {
        Self {
            allowed: false,
            answer: String::new(),
            reason: violation.to_string(),
            confidence,
            citations_found,
            citations_expected,
            violation: Some(violation),
        }
    }
}
