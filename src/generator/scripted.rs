//! Test double that returns a canned draft and counts invocations.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Generator, GeneratorError, GeneratorResult};
use crate::corpus::Passage;

#[derive(Debug)]
enum Script {
    Reply(String),
    Fail(String),
}

/// Generator with a fixed reply (or failure), recording how often it ran and the last prompt.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Script,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedGenerator {
    /// Always answers `draft`.
    pub fn replying(draft: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(draft.into()))
    }

    /// Always fails with [`GeneratorError::Failed`].
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(reason.into()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, _passages: &[Passage]) -> GeneratorResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.to_string());

        match &self.script {
            Script::Reply(draft) => Ok(draft.clone()),
            Script::Fail(reason) => Err(GeneratorError::Failed(reason.clone())),
        }
    }

    fn provider(&self) -> &'static str {
        "scripted"
    }
}
