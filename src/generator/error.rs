use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The upstream model call failed (transport, auth, rate limit, ...).
    #[error("provider '{provider}' request failed: {reason}")]
    Provider {
        provider: &'static str,
        reason: String,
    },

    #[error("provider '{provider}' returned an empty completion")]
    EmptyCompletion { provider: &'static str },

    /// Scripted failure injected by a test double.
    #[error("generator failure: {0}")]
    Failed(String),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
