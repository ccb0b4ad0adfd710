use thiserror::Error;

use crate::generator::GeneratorError;

/// Unrecoverable failure while answering. Refusals are not errors; see
/// [`Outcome::Refused`](super::Outcome::Refused).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("draft generation failed: {0}")]
    Generator(#[from] GeneratorError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
