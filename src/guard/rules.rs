use crate::constants::{
    DEFAULT_MIN_CONFIDENCE, HEDGING_PHRASES, IDEAL_CITATION_DENSITY, LONG_DRAFT_CHARS,
    MAX_DRAFT_CHARS, MIN_DRAFT_CHARS, SHORT_DRAFT_CHARS,
};
use crate::corpus::Passage;

use super::types::Violation;

/// The individual checks a draft answer goes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardRules {
    min_confidence: f32,
}

impl Default for GuardRules {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl GuardRules {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Counts the passages whose `[id]` appears verbatim in `draft`.
    ///
    /// Fails when there are no passages, the draft is blank, or nothing is cited.
    pub fn validate_citations(&self, draft: &str, passages: &[Passage]) -> Result<usize, Violation> {
        if passages.is_empty() {
            return Err(Violation::NoSources);
        }

        if draft.trim().is_empty() {
            return Err(Violation::EmptyResponse);
        }

        let cited = passages
            .iter()
            .filter(|p| draft.contains(&p.citation()))
            .count();

        if cited == 0 {
            return Err(Violation::MissingCitations);
        }

        Ok(cited)
    }

    /// Checks draft length bounds and the hedging-phrase denylist.
    pub fn validate_content(&self, draft: &str) -> Result<(), Violation> {
        let chars = draft.chars().count();

        if chars < MIN_DRAFT_CHARS {
            return Err(Violation::TooShort { chars });
        }

        if chars > MAX_DRAFT_CHARS {
            return Err(Violation::TooLong { chars });
        }

        let lowered = draft.to_lowercase();
        if let Some(phrase) = HEDGING_PHRASES.iter().copied().find(|p| lowered.contains(p)) {
            return Err(Violation::UncertainLanguage { phrase });
        }

        Ok(())
    }

    /// Blends citation coverage (70%), a length factor (20%) and citation density (10%).
    ///
    /// Returns `0.0` when no citations were expected.
    pub fn calculate_confidence(
        &self,
        citations_found: usize,
        citations_expected: usize,
        draft: &str,
    ) -> f32 {
        if citations_expected == 0 {
            return 0.0;
        }

        let chars = draft.chars().count();
        let coverage = citations_found as f32 / citations_expected as f32;

        let length_factor: f32 = if chars < SHORT_DRAFT_CHARS {
            0.8
        } else if chars > LONG_DRAFT_CHARS {
            0.9
        } else {
            1.0
        };

        let per_hundred = citations_found as f32 / chars.max(1) as f32 * 100.0;
        let density = (per_hundred / IDEAL_CITATION_DENSITY).min(1.0);

        (0.7 * coverage + 0.2 * length_factor + 0.1 * density).min(1.0)
    }

    /// Fails when `confidence` is below the configured minimum.
    pub fn check_confidence(&self, confidence: f32) -> Result<(), Violation> {
        if confidence < self.min_confidence {
            return Err(Violation::LowConfidence {
                confidence,
                threshold: self.min_confidence,
            });
        }
        Ok(())
    }
}
