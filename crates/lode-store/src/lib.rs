//! Chunk storage for Lode.
//!
//! A chunk store maps a [`ChunkRef`](lode_types::ChunkRef) to the raw bytes
//! stored under that content address. The decoder consumes stores through
//! the [`ChunkFetcher`] capability and never cares where the bytes live.
//!
//! # Backends
//!
//! - [`InMemoryChunkStore`] — `HashMap`-based store for tests and embedding
//! - [`DirChunkStore`] — one file per ref under a root directory
//!
//! # Design Rules
//!
//! 1. Chunks are immutable: a ref always names the same bytes.
//! 2. Concurrent fetches are always safe (chunks are immutable).
//! 3. The store never interprets chunk contents — it is a pure key-value
//!    source of bytes.
//! 4. A missing chunk is an error ([`FetchError::NotFound`]), never an
//!    empty payload.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{FetchError, FetchResult};
pub use fs::DirChunkStore;
pub use memory::InMemoryChunkStore;
pub use traits::ChunkFetcher;
