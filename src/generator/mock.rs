//! Template-driven generator for development and tests.

use async_trait::async_trait;
use tracing::debug;

use super::{Generator, GeneratorResult};
use crate::corpus::Passage;

/// Returned when there are no passages to cite.
pub const NO_POLICY_FOUND: &str = "No relevant policy found in the knowledge base.";

struct Template {
    triggers: &'static [&'static str],
    evidence: &'static [&'static str],
    answer: &'static str,
}

const TEMPLATES: &[Template] = &[
    Template {
        triggers: &["mfa", "multi-factor"],
        evidence: &["mfa"],
        answer: "MFA is required for administrative access to all systems",
    },
    Template {
        triggers: &["secret", "credential"],
        evidence: &["secret", "vault"],
        answer: "Secrets must not be committed to git. Use a vault like HashiCorp Vault or AWS Secrets Manager",
    },
    Template {
        triggers: &["pii", "personal"],
        evidence: &["pii"],
        answer: "PII should be masked in logs and backups. Use tokenization for sensitive data",
    },
    Template {
        triggers: &["training"],
        evidence: &["training"],
        answer: "Employees must complete security training annually",
    },
    Template {
        triggers: &["password"],
        evidence: &["password"],
        answer: "Password requirements: minimum 12 characters, complexity required, 90-day rotation",
    },
];

/// Answers from fixed topic templates, citing the first passage that mentions the topic.
///
/// Topic detection looks at the whole prompt, passages included. Without a matching template the
/// first passage is echoed back with its citation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of [`Generator::generate`].
    pub fn draft(&self, prompt: &str, passages: &[Passage]) -> String {
        let prompt = prompt.to_lowercase();

        for template in TEMPLATES {
            if !template.triggers.iter().any(|t| prompt.contains(t)) {
                continue;
            }
            let relevant = passages.iter().find(|p| {
                let text = p.text().to_lowercase();
                template.evidence.iter().any(|e| text.contains(e))
            });
            if let Some(passage) = relevant {
                return format!("{} {}.", template.answer, passage.citation());
            }
        }

        match passages.first() {
            Some(first) => format!("{} {}.", first.text(), first.citation()),
            None => NO_POLICY_FOUND.to_string(),
        }
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str, passages: &[Passage]) -> GeneratorResult<String> {
        debug!(prompt_len = prompt.len(), passages = passages.len(), "Mock completion");
        Ok(self.draft(prompt, passages))
    }

    fn provider(&self) -> &'static str {
        "mock"
    }
}
