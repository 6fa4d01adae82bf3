//! Recursive-descent decoding of structured chunks.
//!
//! The decoder walks the generic JSON tree of a `j` chunk and maps each
//! recognized shape to a [`Value`]. Structural decoding is synchronous;
//! the only suspension points are chunk fetches, which happen in exactly
//! two places: the top-level fetch in [`decode_value`] and compound
//! segment fetches in the assembler. References (`{"ref": ...}`) never
//! fetch here — they become [`LazyRef`] handles resolved on demand.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use lode_store::ChunkFetcher;
use lode_types::ChunkRef;
use tracing::debug;

use crate::chunk::Chunk;
use crate::compound;
use crate::error::{DecodeError, DecodeResult};
use crate::lazy::LazyRef;
use crate::number::Number;
use crate::value::{TypeDesc, Value, ValueMap, ValueSet};

/// Decode the value stored under `target`.
///
/// Fetches the chunk, classifies it by its tag byte, and either returns
/// the raw payload as a [`Value::Blob`] or runs the structured decoder
/// over the parsed tree. Nested refs come back lazy; compound nodes are
/// reassembled (fetching segments through the same path) before the call
/// returns.
pub async fn decode_value(
    target: &ChunkRef,
    fetcher: Arc<dyn ChunkFetcher>,
) -> DecodeResult<Value> {
    debug!(target = %target, "decoding chunk");
    let bytes = fetcher.fetch(target).await?;
    match Chunk::parse(bytes)? {
        Chunk::Raw(data) => Ok(Value::Blob(data)),
        Chunk::Structured(tree) => decode_tree(&tree, &fetcher).await,
    }
}

/// Decode one generic tree node.
///
/// Boxed because the recursion re-enters through async calls: list
/// elements are themselves nodes, and compound nodes decode their
/// segments through [`decode_value`].
pub(crate) fn decode_tree<'a>(
    node: &'a serde_json::Value,
    fetcher: &'a Arc<dyn ChunkFetcher>,
) -> Pin<Box<dyn Future<Output = DecodeResult<Value>> + Send + 'a>> {
    Box::pin(async move {
        match node {
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Number(_) => Err(DecodeError::UntaggedNumber),
            serde_json::Value::Object(obj) => decode_object(obj, fetcher).await,
            other => Err(DecodeError::UnknownShape(format!(
                "bare {} node",
                json_kind(other)
            ))),
        }
    })
}

async fn decode_object(
    obj: &serde_json::Map<String, serde_json::Value>,
    fetcher: &Arc<dyn ChunkFetcher>,
) -> DecodeResult<Value> {
    let mut fields = obj.iter();
    let (key, body) = match (fields.next(), fields.next()) {
        (Some(field), None) => field,
        _ => {
            return Err(DecodeError::UnknownShape(format!(
                "object with {} keys",
                obj.len()
            )))
        }
    };

    if let Some(number) = Number::from_wire(key, body) {
        return number.map(Value::Number);
    }

    match key.as_str() {
        "list" => {
            let items = decode_elements(key, body, fetcher).await?;
            Ok(Value::List(items))
        }
        "set" => {
            let items = decode_elements(key, body, fetcher).await?;
            Ok(Value::Set(items.into_iter().collect::<ValueSet>()))
        }
        "map" => {
            let items = decode_elements(key, body, fetcher).await?;
            if items.len() % 2 != 0 {
                return Err(DecodeError::OddMapPayload(items.len()));
            }
            let mut map = ValueMap::new();
            let mut items = items.into_iter();
            while let (Some(k), Some(v)) = (items.next(), items.next()) {
                map.insert(k, v);
            }
            Ok(Value::Map(map))
        }
        "ref" => {
            let target = body.as_str().ok_or_else(|| {
                DecodeError::UnknownShape(format!("`ref` payload must be a string, got {body}"))
            })?;
            Ok(Value::Ref(LazyRef::new(
                ChunkRef::new(target),
                Arc::clone(fetcher),
            )))
        }
        "type" => decode_type(body, fetcher).await,
        "cl" => {
            let segments = compound::parse_segments(body)?;
            let items = compound::assemble_list(segments, fetcher).await?;
            Ok(Value::List(items))
        }
        "cb" => {
            let segments = compound::parse_segments(body)?;
            let data = compound::assemble_blob(segments, fetcher).await?;
            Ok(Value::Blob(data))
        }
        other => Err(DecodeError::UnknownShape(format!("unknown key `{other}`"))),
    }
}

/// Decode the elements of a `list`/`set`/`map` payload array, in order.
async fn decode_elements(
    key: &str,
    body: &serde_json::Value,
    fetcher: &Arc<dyn ChunkFetcher>,
) -> DecodeResult<Vec<Value>> {
    let arr = body.as_array().ok_or_else(|| {
        DecodeError::UnknownShape(format!("`{key}` payload must be an array, got {body}"))
    })?;
    let mut items = Vec::with_capacity(arr.len());
    for element in arr {
        items.push(decode_tree(element, fetcher).await?);
    }
    Ok(items)
}

/// Decode a `type` node into a [`TypeDesc`].
///
/// `kind` and `name` are required and decoded eagerly. `desc` follows the
/// ordinary list/ref rules, so its elements may themselves be lazy refs.
/// `pkgRef` must be a ref node. Extra fields are ignored: the kind
/// registry that gives them meaning lives outside the decoder.
async fn decode_type(
    node: &serde_json::Value,
    fetcher: &Arc<dyn ChunkFetcher>,
) -> DecodeResult<Value> {
    let obj = node.as_object().ok_or_else(|| {
        DecodeError::UnknownShape(format!("`type` payload must be an object, got {node}"))
    })?;

    let kind_node = obj.get("kind").ok_or(DecodeError::MissingField {
        field: "kind",
        context: "type descriptor",
    })?;
    let kind = match decode_tree(kind_node, fetcher).await? {
        Value::Number(n) => n,
        other => {
            return Err(DecodeError::UnknownShape(format!(
                "type kind must be a numeric wrapper, got {}",
                other.kind_name()
            )))
        }
    };

    let name = obj
        .get("name")
        .ok_or(DecodeError::MissingField {
            field: "name",
            context: "type descriptor",
        })?
        .as_str()
        .ok_or_else(|| DecodeError::UnknownShape("type name must be a string".into()))?
        .to_owned();

    let desc = match obj.get("desc") {
        Some(desc_node) => Some(Box::new(decode_tree(desc_node, fetcher).await?)),
        None => None,
    };

    let pkg_ref = match obj.get("pkgRef") {
        Some(pkg_node) => match decode_tree(pkg_node, fetcher).await? {
            Value::Ref(r) => Some(r),
            other => {
                return Err(DecodeError::UnknownShape(format!(
                    "type pkgRef must be a ref, got {}",
                    other.kind_name()
                )))
            }
        },
        None => None,
    };

    Ok(Value::Type(TypeDesc {
        kind,
        name,
        desc,
        pkg_ref,
    }))
}

fn json_kind(node: &serde_json::Value) -> &'static str {
    match node {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
