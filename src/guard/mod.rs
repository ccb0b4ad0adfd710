//! Citation guard for generated drafts.
//!
//! A draft passes through three gates in order, and the first failure decides:
//!
//! 1. **Citations**: at least one supplied passage is cited as `[id]`.
//! 2. **Content**: length within bounds, no hedging language.
//! 3. **Confidence**: the blended score reaches the configured minimum.
//!
//! Validation is a pure function of its inputs and never errors; every failure is an
//! `allowed: false` [`GuardDecision`] carrying a reason.

pub mod rules;
pub mod types;


pub use rules::GuardRules;
pub use types::{GuardDecision, Violation};

use tracing::{debug, info, warn};

use crate::corpus::Passage;

/// Validates drafts against the passages they were generated from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Guard {
    rules: GuardRules,
}

impl Guard {
    pub fn new(min_confidence: f32) -> Self {
        Self {
            rules: GuardRules::new(min_confidence),
        }
    }

    pub fn rules(&self) -> &GuardRules {
        &self.rules
    }

    /// Runs the gates in order and returns the decision.
    pub fn validate(&self, query: &str, draft: &str, passages: &[Passage]) -> GuardDecision {
        let expected = passages.len();

        debug!(
            query_len = query.len(),
            draft_len = draft.len(),
            passages = expected,
            "Validating draft"
        );

        let cited = match self.rules.validate_citations(draft, passages) {
            Ok(cited) => cited,
            Err(violation) => {
                warn!(reason = %violation, "Citation validation failed");
                return GuardDecision::refuse(violation, 0.0, 0, expected);
            }
        };

        if let Err(violation) = self.rules.validate_content(draft) {
            warn!(reason = %violation, "Content validation failed");
            return GuardDecision::refuse(violation, 0.0, cited, expected);
        }

        let confidence = self.rules.calculate_confidence(cited, expected, draft);

        if let Err(violation) = self.rules.check_confidence(confidence) {
            warn!(reason = %violation, "Confidence below threshold");
            return GuardDecision::refuse(violation, confidence, cited, expected);
        }

        info!(
            confidence,
            citations_found = cited,
            citations_expected = expected,
            "Draft approved"
        );

        GuardDecision::approve(draft.to_string(), confidence, cited, expected)
    }
}
