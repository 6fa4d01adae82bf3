use std::fmt;
use std::sync::Arc;

use lode_store::ChunkFetcher;
use lode_types::ChunkRef;

use crate::decode::decode_value;
use crate::error::DecodeResult;
use crate::value::Value;

/// Unresolved reference to another chunk.
///
/// Constructing a `LazyRef` never fetches: the handle holds only the
/// target ref and the fetcher capability captured at decode time. The
/// referenced chunk is fetched and decoded when [`deref`](Self::deref) is
/// called, and a handle that is dropped without ever being resolved
/// causes no fetch at all.
///
/// Equality and `Debug` consider the target ref only; two handles to the
/// same ref are equal regardless of which fetcher they captured.
#[derive(Clone)]
pub struct LazyRef {
    target: ChunkRef,
    fetcher: Arc<dyn ChunkFetcher>,
}

impl LazyRef {
    /// Wrap a target ref with the fetcher that will resolve it.
    pub fn new(target: ChunkRef, fetcher: Arc<dyn ChunkFetcher>) -> Self {
        Self { target, fetcher }
    }

    /// The referenced chunk's ref.
    pub fn target(&self) -> &ChunkRef {
        &self.target
    }

    /// Fetch and decode the referenced chunk.
    ///
    /// Every call fetches anew — there is no memoization, so callers may
    /// not assume duplicate fetches are deduplicated. The result is
    /// value-equal across calls because chunks are immutable. The decoded
    /// value may itself contain further lazy refs; they are not resolved.
    /// Safe to call concurrently from any number of call sites. Fetch and
    /// decode failures surface unchanged.
    pub async fn deref(&self) -> DecodeResult<Value> {
        decode_value(&self.target, Arc::clone(&self.fetcher)).await
    }
}

impl fmt::Debug for LazyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LazyRef").field(&self.target).finish()
    }
}

impl PartialEq for LazyRef {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for LazyRef {}
