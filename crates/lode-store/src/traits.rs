use async_trait::async_trait;
use bytes::Bytes;
use lode_types::ChunkRef;

use crate::error::FetchResult;

/// Capability to fetch chunk bytes by content address.
///
/// All implementations must satisfy these invariants:
/// - A ref always resolves to the same bytes (chunks are immutable).
/// - `fetch` is safe to call concurrently from any number of in-flight
///   decode or resolve operations.
/// - The fetcher never interprets chunk contents.
/// - A missing chunk is reported as [`FetchError::NotFound`], not as an
///   empty payload.
/// - Retry policy, if any, lives in the implementation; callers see a
///   single result per call.
///
/// [`FetchError::NotFound`]: crate::error::FetchError::NotFound
#[async_trait]
pub trait ChunkFetcher: Send + Sync {
    /// Fetch the raw bytes stored under `target`.
    async fn fetch(&self, target: &ChunkRef) -> FetchResult<Bytes>;
}
