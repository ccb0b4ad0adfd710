use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::metrics::RequestMetrics;
use crate::config::Config;
use crate::corpus::{Corpus, CorpusResult};
use crate::generator::build_generator;
use crate::pipeline::{AnswerPipeline, PipelineSettings};

/// Long-lived state shared by every handler.
#[derive(Clone)]
pub struct GatewayState {
    pub pipeline: Arc<AnswerPipeline>,

    pub config: Arc<Config>,

    pub metrics: Arc<RequestMetrics>,

    pub started_at: DateTime<Utc>,
}

impl GatewayState {
    pub fn new(pipeline: Arc<AnswerPipeline>, config: Config) -> Self {
        Self {
            pipeline,
            config: Arc::new(config),
            metrics: Arc::new(RequestMetrics::new()),
            started_at: Utc::now(),
        }
    }

    /// Seeds the corpus (file or built-in samples), picks the generator, and wires the pipeline.
    pub fn from_config(config: Config) -> CorpusResult<Self> {
        let corpus = match &config.corpus_path {
            Some(path) => Corpus::from_json_file(path)?,
            None => Corpus::from_samples(),
        };
        info!(passages = corpus.len(), "Corpus ready");

        let generator = build_generator(&config);
        let pipeline = AnswerPipeline::new(
            Arc::new(corpus),
            generator,
            PipelineSettings::from(&config),
        );

        Ok(Self::new(Arc::new(pipeline), config))
    }

    /// Whole seconds since the state was created.
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
