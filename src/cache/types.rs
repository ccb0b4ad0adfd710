use std::time::Instant;

/// Cache status values reported in the `X-Warden-Cache` header.
pub const CACHE_STATUS_HIT: &str = "HIT";
pub const CACHE_STATUS_MISS: &str = "MISS";
pub const CACHE_STATUS_BYPASS: &str = "BYPASS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How the answer cache took part in serving a request.
pub enum CacheStatus {
    /// Served from a stored, unexpired answer.
    Hit,
    /// Looked up, not found; the pipeline ran.
    Miss,
    /// Caching is disabled; no lookup or store happened.
    Bypass,
}

impl CacheStatus {
    #[inline]
    /// Returns a stable string suitable for the `X-Warden-Cache` header.
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheStatus::Hit => CACHE_STATUS_HIT,
            CacheStatus::Miss => CACHE_STATUS_MISS,
            CacheStatus::Bypass => CACHE_STATUS_BYPASS,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}

/// A stored value and the instant after which it is no longer served.
///
/// `expires_at == None` means the entry never expires (TTL too large to represent).
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    /// Returns `true` once `now` is strictly past the expiry instant.
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if now > deadline)
    }
}
