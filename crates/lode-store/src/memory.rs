use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use lode_types::ChunkRef;

use crate::error::{FetchError, FetchResult};
use crate::traits::ChunkFetcher;

/// In-memory, HashMap-based chunk store.
///
/// Intended for tests and embedding. Chunks are held behind a `RwLock` for
/// safe concurrent access; `Bytes` payloads are cheap to clone.
pub struct InMemoryChunkStore {
    chunks: RwLock<HashMap<ChunkRef, Bytes>>,
}

impl InMemoryChunkStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            chunks: RwLock::new(HashMap::new()),
        }
    }

    /// Store `data` under `target`. Overwrites silently: callers are
    /// expected to hand out content-addressed refs, so a collision means
    /// identical bytes.
    pub fn insert(&self, target: ChunkRef, data: impl Into<Bytes>) {
        let mut map = self.chunks.write().expect("lock poisoned");
        map.insert(target, data.into());
    }

    /// Number of chunks currently stored.
    pub fn len(&self) -> usize {
        self.chunks.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.chunks.read().expect("lock poisoned").is_empty()
    }

    /// Remove all chunks from the store.
    pub fn clear(&self) {
        self.chunks.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all refs in the store.
    pub fn all_refs(&self) -> Vec<ChunkRef> {
        let map = self.chunks.read().expect("lock poisoned");
        let mut refs: Vec<ChunkRef> = map.keys().cloned().collect();
        refs.sort();
        refs
    }
}

impl Default for InMemoryChunkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChunkFetcher for InMemoryChunkStore {
    async fn fetch(&self, target: &ChunkRef) -> FetchResult<Bytes> {
        let map = self.chunks.read().expect("lock poisoned");
        map.get(target)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(target.clone()))
    }
}

impl std::fmt::Debug for InMemoryChunkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryChunkStore")
            .field("chunk_count", &self.len())
            .finish()
    }
}
