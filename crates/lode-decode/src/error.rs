use lode_store::FetchError;
use lode_types::ChunkRef;

/// Errors from chunk decoding.
///
/// Variants fall into four groups: fetch failures propagated unchanged
/// from the store ([`Fetch`]); format errors where the chunk framing
/// itself is broken ([`EmptyChunk`], [`UnknownTag`], [`MissingSeparator`],
/// [`Json`]); decode errors where a well-framed tree does not match any
/// recognized shape; and the consistency check on compound weights
/// ([`WeightMismatch`]).
///
/// [`Fetch`]: DecodeError::Fetch
/// [`EmptyChunk`]: DecodeError::EmptyChunk
/// [`UnknownTag`]: DecodeError::UnknownTag
/// [`MissingSeparator`]: DecodeError::MissingSeparator
/// [`Json`]: DecodeError::Json
/// [`WeightMismatch`]: DecodeError::WeightMismatch
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The fetcher failed; surfaced unchanged, no retries in the core.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The chunk carried no bytes at all.
    #[error("empty chunk")]
    EmptyChunk,

    /// The leading tag byte is not a recognized chunk class.
    #[error("unknown chunk tag: {0:#04x}")]
    UnknownTag(u8),

    /// The one-byte separator after the tag is missing.
    #[error("missing separator after chunk tag")]
    MissingSeparator,

    /// The structured payload is not well-formed JSON.
    #[error("malformed structured payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The tree node matches none of the recognized shapes.
    #[error("unrecognized node shape: {0}")]
    UnknownShape(String),

    /// A bare number without a width wrapper; widths are load-bearing.
    #[error("bare number without a width tag")]
    UntaggedNumber,

    /// The number does not fit the tagged width.
    #[error("number out of range for {tag}: {value}")]
    NumberOutOfRange { tag: &'static str, value: String },

    /// A `map` payload must alternate keys and values.
    #[error("map payload must hold an even number of entries, got {0}")]
    OddMapPayload(usize),

    /// A required field of a structured record is absent.
    #[error("missing required field `{field}` in {context}")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },

    /// A compound segment entry is not a (ref, weight) pair.
    #[error("malformed compound segment at index {index}: {reason}")]
    MalformedSegment { index: usize, reason: String },

    /// A compound segment decoded to the wrong kind of value.
    #[error("segment {target} decoded to {actual}, expected {expected}")]
    SegmentKind {
        target: ChunkRef,
        expected: &'static str,
        actual: &'static str,
    },

    /// Declared segment weight disagrees with the decoded length.
    #[error("segment {target} weight mismatch: declared {declared}, decoded {actual}")]
    WeightMismatch {
        target: ChunkRef,
        declared: u64,
        actual: u64,
    },

    /// A background segment task failed to run to completion.
    #[error("segment task failed: {0}")]
    Task(String),
}

/// Result alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
