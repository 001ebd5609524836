use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::{Error, Result};

/// Where the bytes of a [`FileHandle`] come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Read from disk when the request is dispatched.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Bytes),
}

/// A file selected for analysis: a name plus lazily read content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    source: FileSource,
}

impl FileHandle {
    /// Creates a handle for a file on disk.
    ///
    /// The name is the final path component; nothing is read until
    /// [`FileHandle::read`] is called.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    /// Creates a handle for in-memory content.
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Bytes(content.into()),
        }
    }

    /// The file name sent with the multipart part.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source of the file's bytes.
    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// The path on disk, if this handle is backed by one.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Bytes(_) => None,
        }
    }

    /// Reads the complete content of the file.
    pub async fn read(&self) -> Result<Bytes> {
        match &self.source {
            FileSource::Bytes(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|err| Error::io(format!("failed to read {}: {err}", path.display()), err)),
        }
    }
}
