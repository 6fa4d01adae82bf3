//! Foundation types for Lode.
//!
//! Lode decodes values out of a content-addressed chunk store. Every chunk
//! is named by a [`ChunkRef`] — an opaque content-address string handed to
//! us by whoever wrote the chunk. This crate deliberately knows nothing
//! about the hash scheme behind a ref: refs are compared, ordered, and
//! used as map keys purely as strings.

pub mod chunk_ref;

pub use chunk_ref::ChunkRef;
