//! Attachment replacement around a record write.
//!
//! A submission that carries files runs in three steps:
//! 1. `stage` stores the new objects one after another. If one fails, the
//!    objects already stored for this submission are removed again.
//! 2. The caller writes the record. If that fails, `StagedUploads::discard`
//!    removes the staged objects, so a failed submission leaves nothing new
//!    behind.
//! 3. After the write succeeds, `remove_superseded` deletes the objects the
//!    record no longer references. This is the one window that can leave
//!    debris: if removal fails the record is already correct and the old
//!    objects are reported as orphaned.

use crate::backend::ContentError;
use crate::content::{ContentClient, Upload};
use crate::models::Bucket;
use tracing::{error, warn};

/// Objects stored for a submission that has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "staged uploads must be kept or discarded"]
pub struct StagedUploads {
    bucket: Bucket,
    paths: Vec<String>,
}

impl StagedUploads {
    pub fn none(bucket: Bucket) -> Self {
        Self {
            bucket,
            paths: Vec::new(),
        }
    }

    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// First staged path, for single-file fields.
    pub fn first(&self) -> Option<&String> {
        self.paths.first()
    }

    /// Keep the objects; the record now references them.
    pub fn keep(self) -> Vec<String> {
        self.paths
    }

    /// Remove the staged objects after a failed record write.
    ///
    /// Returns the paths that could not be removed.
    pub async fn discard(self, client: &ContentClient) -> Vec<String> {
        if self.paths.is_empty() {
            return Vec::new();
        }
        match client.remove(self.bucket, &self.paths).await {
            Ok(()) => Vec::new(),
            Err(e) => {
                error!(
                    "Failed to discard staged uploads {:?} in {}: {}",
                    self.paths, self.bucket, e
                );
                self.paths
            }
        }
    }
}

/// Store `uploads` in order. All or nothing.
pub async fn stage(
    client: &ContentClient,
    bucket: Bucket,
    uploads: &[Upload],
) -> Result<StagedUploads, ContentError> {
    let mut staged = StagedUploads::none(bucket);

    for upload in uploads {
        match client.upload(bucket, upload).await {
            Ok(path) => staged.paths.push(path),
            Err(e) => {
                error!("Upload of {} to {} failed: {}", upload.file_name, bucket, e);
                staged.discard(client).await;
                return Err(e);
            }
        }
    }

    Ok(staged)
}

/// Best-effort removal of objects the committed record no longer references.
///
/// Returns the orphaned paths (empty when removal succeeded).
pub async fn remove_superseded(
    client: &ContentClient,
    bucket: Bucket,
    paths: Vec<String>,
) -> Vec<String> {
    if paths.is_empty() {
        return paths;
    }
    match client.remove(bucket, &paths).await {
        Ok(()) => Vec::new(),
        Err(e) => {
            warn!("Orphaned objects in {} {:?}: {}", bucket, paths, e);
            paths
        }
    }
}

/// Paths in `before` that are missing from `after`.
pub fn superseded(before: &[String], after: &[String]) -> Vec<String> {
    before
        .iter()
        .filter(|path| !after.contains(path))
        .cloned()
        .collect()
}
