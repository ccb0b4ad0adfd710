//! Cross-cutting, shared constants.
//!
//! Defaults here are the values the pipeline runs with when no `WARDEN_*` override is set.
//! [`Config`](crate::config::Config) copies them at construction; nothing reads them at runtime.

/// Number of passages handed to the generator when the caller does not ask for a specific count.
pub const DEFAULT_TOP_K: usize = 4;

/// Minimum guard confidence for an answer to be returned.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.25;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_MAX_SIZE: usize = 1000;

/// Drafts shorter than this many characters are refused.
pub const MIN_DRAFT_CHARS: usize = 10;
/// Drafts longer than this many characters are refused.
pub const MAX_DRAFT_CHARS: usize = 5000;

/// Drafts below this length get a reduced length factor in the confidence score.
pub const SHORT_DRAFT_CHARS: usize = 50;
/// Drafts above this length get a reduced length factor in the confidence score.
pub const LONG_DRAFT_CHARS: usize = 2000;

/// Citations per 100 characters that count as full density.
pub const IDEAL_CITATION_DENSITY: f32 = 5.0;

/// Case-folded phrases that mark a draft as speculative rather than grounded.
pub const HEDGING_PHRASES: [&str; 5] = [
    "i think",
    "in my opinion",
    "i believe",
    "personally",
    "i would say",
];

/// Separator between the parts of a fingerprint's canonical string.
pub const FINGERPRINT_SEPARATOR: &str = "|";

/// Query length bounds enforced by the HTTP layer (after trimming).
pub const MIN_QUERY_CHARS: usize = 3;
pub const MAX_QUERY_CHARS: usize = 1000;

/// Response header reporting how an `/ask` request was served.
pub const WARDEN_CACHE_HEADER: &str = "X-Warden-Cache";
/// Response header carrying the request wall time in seconds.
pub const PROCESS_TIME_HEADER: &str = "X-Process-Time";
