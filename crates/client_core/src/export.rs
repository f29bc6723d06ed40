use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use shared::domain::RecordId;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_EXPORT_EXTENSION: &str = "pdf";

/// Binary document returned by the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to stage export document: {0}")]
    Stage(#[source] io::Error),
    #[error("failed to save '{}': {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("save cancelled")]
    Cancelled,
}

/// Destination for exported documents.
///
/// The payload is first materialized into a locally addressable resource,
/// then saved under a file name, then released. `release` takes the handle
/// by value, so a handle can never be released twice.
pub trait DocumentSink {
    type Handle;

    fn materialize(&mut self, bytes: &[u8]) -> Result<Self::Handle, ExportError>;
    fn save_as(&mut self, handle: &Self::Handle, file_name: &str) -> Result<PathBuf, ExportError>;
    fn release(&mut self, handle: Self::Handle);
}

/// Materializes, saves, then releases. The release always runs after the
/// save attempt, whether or not the save succeeded.
pub fn deliver<K: DocumentSink + ?Sized>(
    sink: &mut K,
    bytes: &[u8],
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let handle = sink.materialize(bytes)?;
    let saved = sink.save_as(&handle, file_name);
    sink.release(handle);
    saved
}

/// `prediction_<id>.<ext>`, with the extension taken from the content type
/// and defaulting to `pdf`.
pub fn export_file_name(id: &RecordId, content_type: Option<&str>) -> String {
    let safe_id: String = id
        .as_str()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("prediction_{safe_id}.{}", extension_for(content_type))
}

fn extension_for(content_type: Option<&str>) -> &'static str {
    let Some(essence) = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
    else {
        return DEFAULT_EXPORT_EXTENSION;
    };
    if essence.is_empty() || essence == "application/octet-stream" {
        return DEFAULT_EXPORT_EXTENSION;
    }
    mime_guess::get_mime_extensions_str(&essence)
        .and_then(|extensions| extensions.first().copied())
        .unwrap_or(DEFAULT_EXPORT_EXTENSION)
}

/// Stages documents in a temporary file and copies them into a directory.
pub struct DirectorySink {
    target_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}

impl DocumentSink for DirectorySink {
    type Handle = NamedTempFile;

    fn materialize(&mut self, bytes: &[u8]) -> Result<Self::Handle, ExportError> {
        let mut staged = NamedTempFile::new().map_err(ExportError::Stage)?;
        staged.write_all(bytes).map_err(ExportError::Stage)?;
        staged.flush().map_err(ExportError::Stage)?;
        Ok(staged)
    }

    fn save_as(&mut self, handle: &Self::Handle, file_name: &str) -> Result<PathBuf, ExportError> {
        let path = self.target_dir.join(file_name);
        fs::create_dir_all(&self.target_dir)
            .and_then(|()| fs::copy(handle.path(), &path))
            .map_err(|source| ExportError::Save {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "export saved");
        Ok(path)
    }

    fn release(&mut self, handle: Self::Handle) {
        let staged_path = handle.path().to_path_buf();
        if let Err(err) = handle.close() {
            warn!(path = %staged_path.display(), "failed to remove staged export: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
