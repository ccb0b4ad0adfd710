//! Warden library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Answer Pipeline
//! - [`AnswerPipeline`], [`PipelineSettings`] - cache check, retrieval, generation, guard
//! - [`Outcome`], [`AnswerRecord`], [`Refusal`], [`PipelineError`] - results and failures
//!
//! ## Components
//! - [`Corpus`], [`Passage`] - the passage store
//! - [`Retriever`], [`score`] - lexical ranking
//! - [`Guard`], [`GuardDecision`], [`Violation`] - citation and confidence validation
//! - [`FingerprintCache`], [`Fingerprint`] - TTL + FIFO answer cache
//! - [`Generator`], [`MockGenerator`], [`GenaiGenerator`] - draft generation
//!
//! ## Server
//! - [`Config`], [`ConfigError`] - environment configuration
//! - [`gateway`] - Axum router and handlers
//!
//! ## Test/Mock Support
//! [`ScriptedGenerator`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod gateway;
pub mod generator;
pub mod guard;
pub mod hashing;
pub mod pipeline;
pub mod retrieval;

pub use cache::{CacheEntry, CacheStatus, FingerprintCache};
pub use config::{Config, ConfigError, Environment};
pub use corpus::{Corpus, CorpusError, CorpusResult, Passage, SAMPLE_POLICIES};
pub use gateway::{GatewayError, GatewayState, create_router};
#[cfg(any(test, feature = "mock"))]
pub use generator::ScriptedGenerator;
pub use generator::{
    GenaiGenerator, Generator, GeneratorError, GeneratorResult, MockGenerator, ProviderKind,
    build_generator,
};
pub use guard::{Guard, GuardDecision, GuardRules, Violation};
pub use hashing::{Fingerprint, fingerprint, fingerprint_query};
pub use pipeline::{
    AnswerPipeline, AnswerRecord, AnswerResponse, Outcome, PipelineError, PipelineResult,
    PipelineSettings, Refusal, RefusalKind,
};
pub use retrieval::{Retriever, ScoredPassage, score};
