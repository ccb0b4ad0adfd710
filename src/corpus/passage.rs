use serde::Serialize;

use super::error::{CorpusError, CorpusResult};

/// A uniquely identified unit of source text that answers may cite as `[id]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Passage {
    id: String,
    text: String,
}

impl Passage {
    /// Creates a passage, rejecting an empty id or whitespace-only text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> CorpusResult<Self> {
        let id = id.into();
        let text = text.into();

        if id.trim().is_empty() {
            return Err(CorpusError::EmptyId);
        }
        if text.trim().is_empty() {
            return Err(CorpusError::EmptyText { id });
        }

        Ok(Self { id, text })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The form an answer uses to cite this passage, e.g. `[IT-101]`.
    #[inline]
    pub fn citation(&self) -> String {
        format!("[{}]", self.id)
    }
}
