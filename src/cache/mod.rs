//! Fingerprint-keyed answer cache.

pub mod fingerprint_cache;
pub mod types;

#[cfg(test)]
mod tests;

pub use fingerprint_cache::FingerprintCache;
pub use types::{CACHE_STATUS_BYPASS, CACHE_STATUS_HIT, CACHE_STATUS_MISS, CacheEntry, CacheStatus};
