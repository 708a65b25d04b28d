//! Scratch storage for an uploaded resume while it is being parsed.
//!
//! Each upload gets a unique name inside the upload directory, so concurrent requests never
//! share a path. The file is removed by `remove()`, and by `Drop` on any path that skips it.

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;

pub struct ScratchUpload {
    file: NamedTempFile,
}

impl ScratchUpload {
    /// Writes `bytes` to `<dir>/<request_id>-<random>.pdf`.
    pub async fn persist(dir: &Path, request_id: Uuid, bytes: Bytes) -> Result<Self, AppError> {
        let dir = dir.to_path_buf();
        let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut file = tempfile::Builder::new()
                .prefix(&format!("{request_id}-"))
                .suffix(".pdf")
                .tempfile_in(&dir)?;
            file.write_all(&bytes)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

        debug!("Persisted upload to {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the file. Failure is logged, never returned.
    pub fn remove(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!("Removed upload {}", path.display()),
            Err(e) => warn!("Failed to remove upload {}: {e}", path.display()),
        }
    }
}
