//! Request fingerprinting for cache keys.
//!
//! Uses BLAKE3 over a canonical string: positional parts in order, then `name=value` pairs sorted
//! by name, joined with [`FINGERPRINT_SEPARATOR`]. Collisions are not guarded against.

use std::fmt;

use crate::constants::FINGERPRINT_SEPARATOR;


/// 32-byte BLAKE3 digest identifying one set of request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Wraps a precomputed digest.
    #[inline]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the lowercase hex form of the digest.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from_bytes(self.0).to_hex().to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Builds the canonical string that [`fingerprint`] hashes.
///
/// Named parameters are sorted by name (stable, so repeated names keep their given order).
pub fn canonical_key(positional: &[&dyn fmt::Display], named: &[(&str, &dyn fmt::Display)]) -> String {
    let mut sorted: Vec<&(&str, &dyn fmt::Display)> = named.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let parts: Vec<String> = positional
        .iter()
        .map(|arg| arg.to_string())
        .chain(sorted.into_iter().map(|(name, value)| format!("{name}={value}")))
        .collect();

    parts.join(FINGERPRINT_SEPARATOR)
}

/// Hashes positional and named parameters into a [`Fingerprint`].
///
/// Equal inputs always give equal fingerprints, regardless of the order named parameters
/// are passed in.
#[inline]
pub fn fingerprint(positional: &[&dyn fmt::Display], named: &[(&str, &dyn fmt::Display)]) -> Fingerprint {
    let key = canonical_key(positional, named);
    Fingerprint(*blake3::hash(key.as_bytes()).as_bytes())
}

/// Fingerprint of an `/ask` request: the query plus its retrieval parameters.
#[inline]
pub fn fingerprint_query(query: &str, top_k: usize) -> Fingerprint {
    fingerprint(&[&query], &[("top_k", &top_k)])
}
