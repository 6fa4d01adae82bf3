//! Value decoding for Lode.
//!
//! This crate turns the raw bytes of a content-addressed chunk into a
//! typed [`Value`]. A chunk's one-byte tag selects between a structured
//! JSON-embedded encoding and a raw blob payload; structured trees are
//! decoded by shape into numbers, strings, booleans, ordered lists, sets,
//! maps, type descriptors, and lazy references. Values spanning several
//! chunks (compound lists and blobs) are reassembled in segment order,
//! fetching segments concurrently.
//!
//! # Entry point
//!
//! ```no_run
//! # async fn demo() -> lode_decode::DecodeResult<()> {
//! use std::sync::Arc;
//! use lode_decode::decode_value;
//! use lode_store::{ChunkFetcher, InMemoryChunkStore};
//! use lode_types::ChunkRef;
//!
//! let store = Arc::new(InMemoryChunkStore::new());
//! store.insert(ChunkRef::new("sha1-c0ffee"), &b"j true"[..]);
//!
//! let value = decode_value(
//!     &ChunkRef::new("sha1-c0ffee"),
//!     store as Arc<dyn ChunkFetcher>,
//! )
//! .await?;
//! assert_eq!(value.as_bool(), Some(true));
//! # Ok(())
//! # }
//! ```
//!
//! # Laziness
//!
//! `{"ref": ...}` nodes decode to [`LazyRef`] handles without fetching;
//! the referenced chunk is only read when [`LazyRef::deref`] is called.
//! Everything else in a decoded value is eager and immutable.

pub mod chunk;
mod compound;
pub mod decode;
pub mod error;
pub mod lazy;
pub mod number;
pub mod value;

pub use chunk::Chunk;
pub use decode::decode_value;
pub use error::{DecodeError, DecodeResult};
pub use lazy::LazyRef;
pub use number::Number;
pub use value::{TypeDesc, Value, ValueMap, ValueSet};
