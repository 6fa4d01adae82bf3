use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque content-address of a chunk.
///
/// A `ChunkRef` names a chunk's content, not its location. The store that
/// produced the ref defines the hash scheme; Lode treats the string as a
/// pure key. Identical content yields an identical ref, so refs are safe
/// to deduplicate and to use as map keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkRef(String);

impl ChunkRef {
    /// Wrap a ref string. No validation: the hash format is opaque.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The ref as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ref, yielding the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Truncated form for display (first 12 characters).
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(12)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for ChunkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkRef({})", self.0)
    }
}

impl fmt::Display for ChunkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChunkRef {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ChunkRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ChunkRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
