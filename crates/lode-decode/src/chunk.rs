use bytes::Bytes;

use crate::error::{DecodeError, DecodeResult};

/// One fetched chunk, classified by its leading tag byte.
///
/// Wire format: `<tag><sep><payload>` where `sep` is a single ASCII
/// space. Tag `j` marks a structured payload (UTF-8 JSON text); tag `b`
/// marks a raw blob whose payload is taken verbatim.
#[derive(Debug, Clone)]
pub enum Chunk {
    /// Structured payload, parsed into a generic tree.
    Structured(serde_json::Value),
    /// Raw blob payload, byte-for-byte as stored.
    Raw(Bytes),
}

impl Chunk {
    /// Classify and parse one chunk's bytes.
    ///
    /// Performs no fetching and has no side effects; the only work beyond
    /// inspecting the two framing bytes is the JSON parse for `j` chunks.
    pub fn parse(bytes: Bytes) -> DecodeResult<Chunk> {
        let tag = *bytes.first().ok_or(DecodeError::EmptyChunk)?;
        match bytes.get(1) {
            Some(b' ') => {}
            _ => return Err(DecodeError::MissingSeparator),
        }
        let payload = bytes.slice(2..);
        match tag {
            b'j' => {
                let tree = serde_json::from_slice(&payload)?;
                Ok(Chunk::Structured(tree))
            }
            b'b' => Ok(Chunk::Raw(payload)),
            other => Err(DecodeError::UnknownTag(other)),
        }
    }
}
