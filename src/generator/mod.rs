//! Draft answer generation.
//!
//! The pipeline only sees the [`Generator`] capability. Which implementation backs it is decided
//! once, at startup, by [`build_generator`] from the configured provider name.

pub mod error;
pub mod mock;
pub mod remote;

#[cfg(any(test, feature = "mock"))]
pub mod scripted;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use genai::adapter::AdapterKind;
use tracing::{info, warn};

use crate::config::Config;
use crate::corpus::Passage;

pub use error::{GeneratorError, GeneratorResult};
pub use mock::{MockGenerator, NO_POLICY_FOUND};
pub use remote::GenaiGenerator;

#[cfg(any(test, feature = "mock"))]
pub use scripted::ScriptedGenerator;

#[async_trait]
/// Produces a draft answer from a prompt and the passages it was built from.
pub trait Generator: Send + Sync {
    /// Returns the draft text. Errors are collaborator failures, not refusals.
    async fn generate(&self, prompt: &str, passages: &[Passage]) -> GeneratorResult<String>;

    /// Provider name for logs and diagnostics.
    fn provider(&self) -> &'static str;
}

/// Known generator providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Mock,
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Model used when none is configured for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Mock | ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-haiku-latest",
        }
    }

    /// The `genai` adapter requests must go through; `None` for the offline mock.
    pub fn adapter_kind(&self) -> Option<AdapterKind> {
        match self {
            ProviderKind::Mock => None,
            ProviderKind::OpenAi => Some(AdapterKind::OpenAI),
            ProviderKind::Anthropic => Some(AdapterKind::Anthropic),
        }
    }

    /// Whether `genai` would route `model` to this provider's adapter.
    pub fn serves_model(&self, model: &str) -> bool {
        match self.adapter_kind() {
            None => true,
            Some(expected) => resolve_adapter(model) == Some(expected),
        }
    }

    /// Returns `requested` when this provider serves it, otherwise [`default_model`](Self::default_model).
    pub fn select_model(&self, requested: &str) -> String {
        if self.serves_model(requested) {
            return requested.to_string();
        }
        warn!(
            provider = %self,
            model = requested,
            fallback = self.default_model(),
            "Model belongs to another provider, using provider default"
        );
        self.default_model().to_string()
    }
}

/// The adapter `genai` picks for a model name.
pub fn resolve_adapter(model: &str) -> Option<AdapterKind> {
    AdapterKind::from_model(model).ok()
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for provider names outside [`ProviderKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown LLM provider: {}", self.0)
    }
}

impl std::error::Error for UnknownProvider {}

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ProviderKind::Mock),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Resolves a provider name, falling back to [`ProviderKind::Mock`] for unknown names.
pub fn resolve_provider(name: &str) -> ProviderKind {
    name.parse().unwrap_or_else(|e: UnknownProvider| {
        warn!(provider = %e.0, "Unknown LLM provider, falling back to mock");
        ProviderKind::Mock
    })
}

/// Builds the generator selected by `config.llm_provider`.
///
/// The provider decides the backend. A configured model that routes elsewhere is replaced by
/// the provider's default.
pub fn build_generator(config: &Config) -> Arc<dyn Generator> {
    let kind = resolve_provider(&config.llm_provider);

    match kind {
        ProviderKind::Mock => {
            info!(provider = %kind, "Initialized LLM provider");
            Arc::new(MockGenerator::new())
        }
        ProviderKind::OpenAi | ProviderKind::Anthropic => {
            let generator = GenaiGenerator::new(kind, config.llm_model.clone());
            info!(
                provider = %kind,
                model = %generator.model(),
                adapter = ?generator.adapter_kind(),
                "Initialized LLM provider"
            );
            Arc::new(generator)
        }
    }
}
