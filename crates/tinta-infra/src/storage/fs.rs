//! Filesystem media store.
//!
//! Uploaded images live under a single media root, with avatars in an
//! `avatar/` subfolder. Covers get a generated globally-unique name so two
//! uploads of the same file never collide; avatars use a fixed per-user
//! name so a new upload overwrites the previous one.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use tinta_core::ports::{MediaStore, StorageError};

/// Subfolder of the media root that holds user avatars.
pub const AVATAR_DIR: &str = "avatar";

/// Media store rooted at a directory on the local filesystem.
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store_cover(&self, extension: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let filename = format!("{}.{}", Uuid::new_v4().simple(), extension);

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        fs::write(self.root.join(&filename), bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(%filename, size = bytes.len(), "Stored post cover");
        Ok(filename)
    }

    async fn store_avatar(&self, user_id: Uuid, bytes: &[u8]) -> Result<String, StorageError> {
        let dir = self.root.join(AVATAR_DIR);
        let filename = format!("{user_id}.jpg");

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        fs::write(dir.join(&filename), bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(%filename, size = bytes.len(), "Stored avatar");
        Ok(filename)
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(relative);
        // Only plain path segments; anything like `..` or an absolute path
        // would escape the media root.
        if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(StorageError::InvalidPath(relative.to_owned()));
        }

        Ok(self.root.join(rel))
    }
}
