use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// URL prefix under which the active photo directory is served
pub const PUBLIC_PREFIX: &str = "static";

/// On-disk layout for uploaded photos and their archived copies.
///
/// Stored records keep the public path (`static/<file name>`); the file itself
/// lives at `<photos_dir>/<file name>` until its record is deleted, after which
/// it is moved to `<deleted_dir>/<file name>`.
#[derive(Clone, Debug)]
pub struct PhotoStorage {
    photos_dir: PathBuf,
    deleted_dir: PathBuf,
}

impl PhotoStorage {
    pub fn new(photos_dir: impl Into<PathBuf>, deleted_dir: impl Into<PathBuf>) -> Self {
        Self {
            photos_dir: photos_dir.into(),
            deleted_dir: deleted_dir.into(),
        }
    }

    pub fn photos_dir(&self) -> &Path {
        &self.photos_dir
    }

    pub fn deleted_dir(&self) -> &Path {
        &self.deleted_dir
    }

    /// Create the active photo directory if it is missing
    pub async fn ensure_dirs(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.photos_dir).await
    }

    /// `<YYYY-MM-DD>-<plant name>` with spaces and path separators replaced
    pub fn file_name_for(date: NaiveDate, plant_name: &str) -> String {
        let name: String = plant_name
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                other => other,
            })
            .collect();
        format!("{}-{}", date.format("%Y-%m-%d"), name)
    }

    pub fn public_path(file_name: &str) -> String {
        format!("{}/{}", PUBLIC_PREFIX, file_name)
    }

    /// Map a stored public path back to its file in the active directory.
    /// Only the final path component is used.
    pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let relative = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(public_path);
        let file_name = Path::new(relative).file_name()?;
        Some(self.photos_dir.join(file_name))
    }

    /// Write an uploaded image, replacing any file of the same name
    pub async fn store(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        self.ensure_dirs().await?;
        let location = self.photos_dir.join(file_name);
        tokio::fs::write(&location, bytes).await?;
        debug!("Stored photo at {}", location.display());
        Ok(location)
    }

    /// Move the file behind `public_path` into the archive directory.
    ///
    /// Returns `Ok(None)` when there is no file to move.
    pub async fn archive(&self, public_path: &str) -> io::Result<Option<PathBuf>> {
        let Some(source) = self.resolve(public_path) else {
            return Ok(None);
        };
        if tokio::fs::metadata(&source).await.is_err() {
            return Ok(None);
        }
        let Some(file_name) = source.file_name() else {
            return Ok(None);
        };

        tokio::fs::create_dir_all(&self.deleted_dir).await?;
        let destination = self.deleted_dir.join(file_name);
        tokio::fs::rename(&source, &destination).await?;
        Ok(Some(destination))
    }

    /// Archive and log the outcome; never fails.
    pub async fn archive_best_effort(&self, public_path: &str) {
        match self.archive(public_path).await {
            Ok(Some(destination)) => {
                info!("Archived photo {} to {}", public_path, destination.display())
            }
            Ok(None) => debug!("No file on disk for photo {}, nothing to archive", public_path),
            Err(e) => warn!("Failed to move file {}: {}", public_path, e),
        }
    }
}
