use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use colored::Colorize;
use lode_decode::{decode_value, DecodeResult, Number, Value};
use lode_store::{ChunkFetcher, DirChunkStore};
use lode_types::ChunkRef;
use serde_json::json;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = DirChunkStore::new(&cli.store);
    match cli.command {
        Command::Show(args) => cmd_show(store, &cli.format, args).await,
        Command::Cat(args) => cmd_cat(store, args).await,
        Command::Refs(_) => cmd_refs(store).await,
    }
}

async fn cmd_show(store: DirChunkStore, format: &OutputFormat, args: ShowArgs) -> anyhow::Result<()> {
    let fetcher: Arc<dyn ChunkFetcher> = Arc::new(store);
    let value = decode_value(&ChunkRef::new(args.target), fetcher).await?;
    let value = expand(value, args.depth).await?;
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            render(&value, 0, &mut out);
            print!("{out}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&to_json(&value))?);
        }
    }
    Ok(())
}

async fn cmd_cat(store: DirChunkStore, args: CatArgs) -> anyhow::Result<()> {
    let fetcher: Arc<dyn ChunkFetcher> = Arc::new(store);
    let value = decode_value(&ChunkRef::new(args.target), fetcher).await?;
    match value {
        Value::Blob(data) => {
            use std::io::Write;
            std::io::stdout().write_all(&data)?;
            Ok(())
        }
        other => anyhow::bail!("not a blob: decoded to a {}", other.kind_name()),
    }
}

async fn cmd_refs(store: DirChunkStore) -> anyhow::Result<()> {
    let refs = store.list().await?;
    for r in &refs {
        println!("{r}");
    }
    println!("{}", format!("{} refs", refs.len()).dimmed());
    Ok(())
}

/// Resolve lazy references `depth` levels deep, rebuilding containers
/// around the resolved values. Type descriptors are left untouched: their
/// package ref stays lazy by construction.
fn expand(
    value: Value,
    depth: usize,
) -> Pin<Box<dyn Future<Output = DecodeResult<Value>> + Send>> {
    Box::pin(async move {
        if depth == 0 {
            return Ok(value);
        }
        match value {
            Value::Ref(lazy) => {
                let resolved = lazy.deref().await?;
                expand(resolved, depth - 1).await
            }
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(expand(item, depth).await?);
                }
                Ok(Value::List(out))
            }
            Value::Set(set) => {
                let mut out = lode_decode::ValueSet::new();
                for item in set.iter().cloned() {
                    out.insert(expand(item, depth).await?);
                }
                Ok(Value::Set(out))
            }
            Value::Map(map) => {
                let mut out = lode_decode::ValueMap::new();
                for (k, v) in map.iter() {
                    let key = expand(k.clone(), depth).await?;
                    let value = expand(v.clone(), depth).await?;
                    out.insert(key, value);
                }
                Ok(Value::Map(out))
            }
            other => Ok(other),
        }
    })
}

const BLOB_PREVIEW_BYTES: usize = 32;

fn render(value: &Value, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match value {
        Value::List(items) => {
            out.push_str(&format!("{pad}{} [{}]\n", "list".bold(), items.len()));
            for item in items {
                render(item, indent + 1, out);
            }
        }
        Value::Set(set) => {
            out.push_str(&format!("{pad}{} {{{}}}\n", "set".bold(), set.len()));
            for item in set.iter() {
                render(item, indent + 1, out);
            }
        }
        Value::Map(map) => {
            out.push_str(&format!("{pad}{} {{{}}}\n", "map".bold(), map.len()));
            for (k, v) in map.iter() {
                out.push_str(&format!("{pad}  {}:\n", inline(k)));
                render(v, indent + 2, out);
            }
        }
        Value::Type(desc) => {
            out.push_str(&format!(
                "{pad}{} {} (kind {})\n",
                "type".magenta(),
                desc.name.bold(),
                desc.kind
            ));
            if let Some(d) = &desc.desc {
                out.push_str(&format!("{pad}  desc:\n"));
                render(d, indent + 2, out);
            }
            if let Some(pkg) = &desc.pkg_ref {
                out.push_str(&format!(
                    "{pad}  pkgRef: {}\n",
                    format!("ref {}", pkg.target()).cyan()
                ));
            }
        }
        scalar => out.push_str(&format!("{pad}{}\n", inline(scalar))),
    }
}

/// One-line form of a value, used for scalars and for map keys.
fn inline(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("{n} {}", format!("({})", n.tag()).dimmed()),
        Value::Bool(b) => b.to_string().yellow().to_string(),
        Value::String(s) => format!("{s:?}").green().to_string(),
        Value::Ref(lazy) => format!("ref {}", lazy.target()).cyan().to_string(),
        Value::Blob(data) => {
            let shown = &data[..data.len().min(BLOB_PREVIEW_BYTES)];
            let ellipsis = if data.len() > BLOB_PREVIEW_BYTES { "…" } else { "" };
            format!(
                "blob({} B) {}{}",
                data.len(),
                hex::encode(shown).dimmed(),
                ellipsis
            )
        }
        Value::List(items) => format!("list[{}]", items.len()),
        Value::Set(set) => format!("set{{{}}}", set.len()),
        Value::Map(map) => format!("map{{{}}}", map.len()),
        Value::Type(desc) => format!("type {}", desc.name),
    }
}

/// Display projection of a value as JSON. Unresolved refs come out as
/// `{"ref": ...}`, blobs as hex strings; this is for human consumption,
/// not a re-encoding of the wire format.
fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Number(n) => match *n {
            Number::Int8(v) => json!({ "int8": v }),
            Number::Int16(v) => json!({ "int16": v }),
            Number::Int32(v) => json!({ "int32": v }),
            Number::Int64(v) => json!({ "int64": v }),
            Number::Uint8(v) => json!({ "uint8": v }),
            Number::Uint16(v) => json!({ "uint16": v }),
            Number::Uint32(v) => json!({ "uint32": v }),
            Number::Uint64(v) => json!({ "uint64": v }),
            Number::Float32(v) => json!({ "float32": v }),
            Number::Float64(v) => json!({ "float64": v }),
        },
        Value::Bool(b) => json!(b),
        Value::String(s) => json!(s),
        Value::List(items) => json!(items.iter().map(to_json).collect::<Vec<_>>()),
        Value::Set(set) => json!({ "set": set.iter().map(to_json).collect::<Vec<_>>() }),
        Value::Map(map) => json!({
            "map": map
                .iter()
                .map(|(k, v)| json!([to_json(k), to_json(v)]))
                .collect::<Vec<_>>()
        }),
        Value::Ref(lazy) => json!({ "ref": lazy.target().as_str() }),
        Value::Blob(data) => json!({ "blob": hex::encode(data) }),
        Value::Type(desc) => {
            let mut fields = serde_json::Map::new();
            fields.insert("kind".into(), to_json(&Value::Number(desc.kind)));
            fields.insert("name".into(), json!(desc.name));
            if let Some(d) = &desc.desc {
                fields.insert("desc".into(), to_json(d));
            }
            if let Some(pkg) = &desc.pkg_ref {
                fields.insert("pkgRef".into(), json!({ "ref": pkg.target().as_str() }));
            }
            json!({ "type": fields })
        }
    }
}
