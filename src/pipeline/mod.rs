//! Answer pipeline: cache lookup, retrieval, generation, guard validation, cache store.
//!
//! ```text
//! START -> CACHE_CHECK -> HIT                    => Cached
//!                      -> MISS -> RETRIEVE -> none => Refused(no results)
//!                                          -> GENERATE -> VALIDATE -> refused => Refused(reason)
//!                                                                  -> allowed => STORE, Fresh
//! ```
//!
//! With caching disabled the check and store steps are skipped. Generation is the only
//! suspension point. Nothing is retried.

pub mod error;
pub mod prompt;
pub mod types;


pub use error::{PipelineError, PipelineResult};
pub use prompt::build_prompt;
pub use types::{
    AnswerRecord, AnswerResponse, NO_RESULTS_REASON, Outcome, Refusal, RefusalKind,
};

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::cache::FingerprintCache;
use crate::config::Config;
use crate::constants::{
    DEFAULT_CACHE_MAX_SIZE, DEFAULT_CACHE_TTL_SECS, DEFAULT_MIN_CONFIDENCE, DEFAULT_TOP_K,
};
use crate::corpus::Corpus;
use crate::generator::Generator;
use crate::guard::Guard;
use crate::hashing::fingerprint_query;
use crate::retrieval::Retriever;

/// Characters of a query included in logs.
const QUERY_PREVIEW_CHARS: usize = 100;

/// Pipeline tuning, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub top_k: usize,
    pub min_confidence: f32,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    pub cache_max_size: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            cache_enabled: true,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_max_size: DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            top_k: config.rag_top_k,
            min_confidence: config.rag_min_confidence,
            cache_enabled: config.cache_enabled,
            cache_ttl: config.cache_ttl(),
            cache_max_size: config.cache_max_size,
        }
    }
}

/// Answers questions from a corpus, refusing anything the guard cannot justify.
pub struct AnswerPipeline {
    retriever: Retriever,
    generator: Arc<dyn Generator>,
    guard: Guard,
    cache: Option<Arc<FingerprintCache<AnswerRecord>>>,
    settings: PipelineSettings,
}

impl AnswerPipeline {
    /// Creates a pipeline, with a fresh answer cache when caching is enabled.
    pub fn new(
        corpus: Arc<Corpus>,
        generator: Arc<dyn Generator>,
        settings: PipelineSettings,
    ) -> Self {
        let cache = settings.cache_enabled.then(|| {
            Arc::new(FingerprintCache::new(
                settings.cache_ttl,
                settings.cache_max_size,
            ))
        });

        Self {
            retriever: Retriever::new(corpus),
            generator,
            guard: Guard::new(settings.min_confidence),
            cache,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        self.retriever.corpus()
    }

    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }

    /// The answer cache, `None` when caching is disabled.
    pub fn cache(&self) -> Option<&Arc<FingerprintCache<AnswerRecord>>> {
        self.cache.as_ref()
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Number of cached answers (0 when caching is disabled).
    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Answers with the configured `top_k`.
    pub async fn ask(&self, query: &str) -> PipelineResult<Outcome> {
        self.answer(query, self.settings.top_k).await
    }

    /// Runs the pipeline for one question.
    ///
    /// Only generator failures are errors. A cache hit never touches the retriever or generator.
    #[instrument(skip(self, query), fields(query_len = query.chars().count()))]
    pub async fn answer(&self, query: &str, top_k: usize) -> PipelineResult<Outcome> {
        let preview: String = query.chars().take(QUERY_PREVIEW_CHARS).collect();
        info!(query = %preview, "Processing query");

        let key = fingerprint_query(query, top_k);

        if let Some(cache) = &self.cache
            && let Some(record) = cache.get(&key)
        {
            info!(key = %key, "Returning cached result");
            return Ok(Outcome::Cached(record));
        }

        let passages = self.retriever.search(query, top_k);
        if passages.is_empty() {
            warn!("No relevant documents found");
            return Ok(Outcome::Refused(Refusal::no_results()));
        }

        let prompt = build_prompt(query, &passages);
        let draft = self.generator.generate(&prompt, &passages).await?;

        let decision = self.guard.validate(query, &draft, &passages);
        if !decision.allowed {
            warn!(reason = %decision.reason, "Response rejected");
            return Ok(Outcome::Refused(Refusal::from_decision(decision)));
        }

        let record = AnswerRecord {
            answer: decision.answer,
            sources: passages.iter().map(|p| p.id().to_string()).collect(),
            confidence: decision.confidence,
            citations_found: decision.citations_found,
        };

        if let Some(cache) = &self.cache {
            cache.set(key, record.clone());
        }

        info!(
            confidence = record.confidence,
            citations_found = record.citations_found,
            sources = record.sources.len(),
            "Request successful"
        );

        Ok(Outcome::Fresh(record))
    }
}

impl std::fmt::Debug for AnswerPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerPipeline")
            .field("provider", &self.generator.provider())
            .field("guard", &self.guard)
            .field("cache", &self.cache)
            .field("settings", &self.settings)
            .finish()
    }
}
