use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use client_core::{DocumentSink, ExportError};
use tempfile::NamedTempFile;

/// Stages the document in a temp file, asks the user where to put it, and
/// copies it there. Closing the dialog is a cancellation, not an error.
pub struct DialogSink {
    start_dir: PathBuf,
}

impl DialogSink {
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
        }
    }
}

impl DocumentSink for DialogSink {
    type Handle = NamedTempFile;

    fn materialize(&mut self, bytes: &[u8]) -> Result<Self::Handle, ExportError> {
        let mut staged = NamedTempFile::new().map_err(ExportError::Stage)?;
        staged.write_all(bytes).map_err(ExportError::Stage)?;
        staged.flush().map_err(ExportError::Stage)?;
        Ok(staged)
    }

    fn save_as(&mut self, handle: &Self::Handle, file_name: &str) -> Result<PathBuf, ExportError> {
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.start_dir)
            .set_file_name(file_name)
            .save_file()
        else {
            return Err(ExportError::Cancelled);
        };
        copy_staged(handle.path(), &path)?;
        Ok(path)
    }

    fn release(&mut self, handle: Self::Handle) {
        if let Err(err) = handle.close() {
            tracing::warn!("failed to remove staged export: {err}");
        }
    }
}

fn copy_staged(staged: &Path, target: &Path) -> Result<(), ExportError> {
    fs::copy(staged, target)
        .map(|_| ())
        .map_err(|source| ExportError::Save {
            path: target.to_path_buf(),
            source,
        })
}
