use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use lode_types::ChunkRef;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::traits::ChunkFetcher;

/// Directory-backed chunk store: one file per ref under a root directory.
///
/// The file name is the ref string itself, so refs that could escape the
/// root (path separators, `..`) are rejected before touching the
/// filesystem.
#[derive(Debug, Clone)]
pub struct DirChunkStore {
    root: PathBuf,
}

impl DirChunkStore {
    /// Open a store rooted at `root`. The directory is not required to
    /// exist until the first fetch.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted list of refs present on disk. Subdirectories and non-UTF-8
    /// file names are skipped.
    pub async fn list(&self) -> FetchResult<Vec<ChunkRef>> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut refs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                refs.push(ChunkRef::new(name));
            }
        }
        refs.sort();
        Ok(refs)
    }

    fn chunk_path(&self, target: &ChunkRef) -> FetchResult<PathBuf> {
        let name = target.as_str();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(FetchError::InvalidRef(name.to_owned()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ChunkFetcher for DirChunkStore {
    async fn fetch(&self, target: &ChunkRef) -> FetchResult<Bytes> {
        let path = self.chunk_path(target)?;
        debug!(target = %target, path = %path.display(), "reading chunk file");
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(target.clone()))
            }
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}
