//! In-memory passage corpus.
//!
//! The corpus is append-only for the life of the process. Reads vastly outnumber writes, so a
//! single [`parking_lot::RwLock`] guards the passage list and its id index together; an
//! `add_passage` is never observed half-applied.

pub mod error;
pub mod passage;
pub mod samples;


pub use error::{CorpusError, CorpusResult};
pub use passage::Passage;
pub use samples::SAMPLE_POLICIES;

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct CorpusInner {
    passages: Vec<Passage>,
    index: HashMap<String, usize>,
}

/// Ordered, id-unique collection of [`Passage`]s.
#[derive(Debug, Default)]
pub struct Corpus {
    inner: RwLock<CorpusInner>,
}

/// On-disk shape of one passage in a corpus seed file.
#[derive(Debug, Deserialize)]
struct PassageRecord {
    id: String,
    text: String,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a corpus from passages, keeping the first occurrence of any repeated id.
    pub fn from_passages(passages: impl IntoIterator<Item = Passage>) -> Self {
        let corpus = Self::new();
        for passage in passages {
            corpus.add_passage(passage);
        }
        info!(passages = corpus.len(), "Initialized corpus");
        corpus
    }

    /// Builds a corpus from the built-in [`SAMPLE_POLICIES`].
    pub fn from_samples() -> Self {
        Self::from_passages(
            SAMPLE_POLICIES
                .iter()
                .filter_map(|(id, text)| Passage::new(*id, *text).ok()),
        )
    }

    /// Loads passages from a JSON array of `{"id": ..., "text": ...}` objects.
    pub fn from_json_file(path: &Path) -> CorpusResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<PassageRecord> =
            serde_json::from_str(&raw).map_err(|source| CorpusError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let passages = records
            .into_iter()
            .map(|r| Passage::new(r.id, r.text))
            .collect::<CorpusResult<Vec<_>>>()?;

        Ok(Self::from_passages(passages))
    }

    /// Appends a passage. Returns `false` (and leaves the corpus untouched) if the id exists.
    pub fn add_passage(&self, passage: Passage) -> bool {
        let mut inner = self.inner.write();

        if inner.index.contains_key(passage.id()) {
            warn!(id = passage.id(), "Passage already exists, skipping");
            return false;
        }

        let position = inner.passages.len();
        inner.index.insert(passage.id().to_string(), position);
        debug!(id = passage.id(), "Added passage");
        inner.passages.push(passage);
        true
    }

    /// Returns a copy of the passage with the given id.
    pub fn get(&self, id: &str) -> Option<Passage> {
        let inner = self.inner.read();
        inner
            .index
            .get(id)
            .and_then(|&pos| inner.passages.get(pos))
            .cloned()
    }

    /// Returns `true` if a passage with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().passages.is_empty()
    }

    /// Passage ids in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.inner
            .read()
            .passages
            .iter()
            .map(|p| p.id().to_string())
            .collect()
    }

    /// Runs `f` over the passages (in insertion order) under a read lock.
    ///
    /// Keep `f` short and free of I/O: writers wait until it returns.
    pub fn scan<R>(&self, f: impl FnOnce(&[Passage]) -> R) -> R {
        let inner = self.inner.read();
        f(&inner.passages)
    }
}
