//! Chat-completion generator backed by the `genai` multi-provider client.

use async_trait::async_trait;
use genai::Client;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, error};

use super::{Generator, GeneratorError, GeneratorResult, ProviderKind, resolve_adapter};
use crate::corpus::Passage;

const SYSTEM_PROMPT: &str = "You answer questions about company policy. Use only the provided \
context and cite every statement with the bracketed document id, e.g. [IT-101].";

/// Real model call for the OpenAI and Anthropic providers.
///
/// Credentials come from the provider's usual environment variable (`OPENAI_API_KEY`,
/// `ANTHROPIC_API_KEY`), resolved by `genai` per request.
pub struct GenaiGenerator {
    client: Client,
    kind: ProviderKind,
    model: String,
}

impl GenaiGenerator {
    /// A `model` that `genai` would route to a different provider is replaced by the
    /// provider's default model.
    pub fn new(kind: ProviderKind, model: impl Into<String>) -> Self {
        let model = kind.select_model(&model.into());
        Self {
            client: Client::default(),
            kind,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Adapter the client resolves for this generator's model.
    pub fn adapter_kind(&self) -> Option<AdapterKind> {
        resolve_adapter(&self.model)
    }
}

#[async_trait]
impl Generator for GenaiGenerator {
    async fn generate(&self, prompt: &str, passages: &[Passage]) -> GeneratorResult<String> {
        debug!(
            provider = %self.kind,
            model = %self.model,
            adapter = ?self.adapter_kind(),
            passages = passages.len(),
            "Requesting completion"
        );

        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ]);

        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| {
                error!(provider = %self.kind, "Provider error: {}", e);
                GeneratorError::Provider {
                    provider: self.kind.as_str(),
                    reason: e.to_string(),
                }
            })?;

        let text = response.first_text().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(GeneratorError::EmptyCompletion {
                provider: self.kind.as_str(),
            });
        }

        Ok(text)
    }

    fn provider(&self) -> &'static str {
        self.kind.as_str()
    }
}
