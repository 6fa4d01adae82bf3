//! Reassembly of compound lists and blobs.
//!
//! A compound node carries an ordered list of (ref, weight) segments.
//! Each segment's chunk is fetched and decoded through the normal
//! dispatch path (a segment that is itself compound recurses naturally
//! and arrives already flattened), and the results are concatenated
//! strictly in input-segment order. Segment fetches run concurrently;
//! completion order never influences the result.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use lode_store::ChunkFetcher;
use lode_types::ChunkRef;
use tokio::task::JoinSet;
use tracing::debug;

use crate::decode::decode_value;
use crate::error::{DecodeError, DecodeResult};
use crate::value::Value;

/// One (ref, weight) pair of a compound node. Weight counts list
/// elements for `cl` segments and bytes for `cb` segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    pub target: ChunkRef,
    pub weight: u64,
}

/// Parse the flat `[ref, weight, ref, weight, ...]` alternation.
pub(crate) fn parse_segments(node: &serde_json::Value) -> DecodeResult<Vec<Segment>> {
    let arr = node.as_array().ok_or_else(|| {
        DecodeError::UnknownShape("compound payload must be an array".into())
    })?;
    if arr.len() % 2 != 0 {
        return Err(DecodeError::MalformedSegment {
            index: arr.len() / 2,
            reason: "dangling ref without a weight".into(),
        });
    }
    arr.chunks(2)
        .enumerate()
        .map(|(index, pair)| {
            let target = pair[0].as_str().ok_or_else(|| DecodeError::MalformedSegment {
                index,
                reason: format!("segment ref must be a string, got {}", pair[0]),
            })?;
            let weight = pair[1].as_u64().ok_or_else(|| DecodeError::MalformedSegment {
                index,
                reason: format!(
                    "segment weight must be a non-negative integer, got {}",
                    pair[1]
                ),
            })?;
            Ok(Segment {
                target: ChunkRef::new(target),
                weight,
            })
        })
        .collect()
}

/// Reassemble a compound list: every segment must decode to a list whose
/// length matches its declared weight; elements are concatenated in
/// segment order.
pub(crate) async fn assemble_list(
    segments: Vec<Segment>,
    fetcher: &Arc<dyn ChunkFetcher>,
) -> DecodeResult<Vec<Value>> {
    let decoded = decode_segments(&segments, fetcher).await?;
    let mut out = Vec::new();
    for (segment, value) in segments.into_iter().zip(decoded) {
        match value {
            Value::List(items) => {
                check_weight(&segment, items.len() as u64)?;
                out.extend(items);
            }
            other => {
                return Err(DecodeError::SegmentKind {
                    target: segment.target,
                    expected: "list",
                    actual: other.kind_name(),
                })
            }
        }
    }
    Ok(out)
}

/// Reassemble a compound blob: every segment must decode to a blob whose
/// byte length matches its declared weight; bytes are concatenated in
/// segment order.
pub(crate) async fn assemble_blob(
    segments: Vec<Segment>,
    fetcher: &Arc<dyn ChunkFetcher>,
) -> DecodeResult<Bytes> {
    let decoded = decode_segments(&segments, fetcher).await?;
    // Sized from the decoded segments, not the declared weights: weights
    // are untrusted input until check_weight has accepted them.
    let mut out = BytesMut::with_capacity(
        decoded.iter().map(blob_len).sum(),
    );
    for (segment, value) in segments.into_iter().zip(decoded) {
        match value {
            Value::Blob(data) => {
                check_weight(&segment, data.len() as u64)?;
                out.extend_from_slice(&data);
            }
            other => {
                return Err(DecodeError::SegmentKind {
                    target: segment.target,
                    expected: "blob",
                    actual: other.kind_name(),
                })
            }
        }
    }
    Ok(out.freeze())
}

fn blob_len(value: &Value) -> usize {
    match value {
        Value::Blob(data) => data.len(),
        _ => 0,
    }
}

fn check_weight(segment: &Segment, actual: u64) -> DecodeResult<()> {
    if segment.weight != actual {
        return Err(DecodeError::WeightMismatch {
            target: segment.target.clone(),
            declared: segment.weight,
            actual,
        });
    }
    Ok(())
}

/// Fetch and decode all segments concurrently, returning the results in
/// input-segment order. The first failure aborts the whole assembly;
/// dropping the task set cancels the still-outstanding fetches.
async fn decode_segments(
    segments: &[Segment],
    fetcher: &Arc<dyn ChunkFetcher>,
) -> DecodeResult<Vec<Value>> {
    debug!(segments = segments.len(), "assembling compound value");
    let mut tasks = JoinSet::new();
    for (index, segment) in segments.iter().enumerate() {
        let fetcher = Arc::clone(fetcher);
        let target = segment.target.clone();
        tasks.spawn(async move { (index, decode_value(&target, fetcher).await) });
    }

    let mut slots: Vec<Option<Value>> = Vec::new();
    slots.resize_with(segments.len(), || None);
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.map_err(|e| DecodeError::Task(e.to_string()))?;
        slots[index] = Some(result?);
    }
    Ok(slots
        .into_iter()
        .map(|slot| slot.expect("every segment joins exactly once"))
        .collect())
}
