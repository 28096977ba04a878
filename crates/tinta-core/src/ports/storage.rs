//! Media storage port: where uploaded covers and avatars live.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

/// Image formats accepted for post covers, matched case-insensitively.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Extract the extension from an uploaded filename if it is on the cover
/// allow-list. Returns the lowercased extension.
pub fn image_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Filesystem-backed media storage.
///
/// Covers get a generated, globally-unique name; avatars get a fixed
/// per-user name and each upload overwrites the previous one.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist a post cover. `extension` must already be validated against
    /// [`ALLOWED_IMAGE_EXTENSIONS`]. Returns the stored filename.
    async fn store_cover(&self, extension: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Persist a user avatar under the avatar subfolder, overwriting any
    /// previous file. Returns the stored filename (relative to the avatar
    /// subfolder).
    async fn store_avatar(&self, user_id: Uuid, bytes: &[u8]) -> Result<String, StorageError>;

    /// Resolve a client-supplied relative path to an absolute path inside
    /// the media root, rejecting traversal outside it.
    fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError>;
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allow_listed_extensions_case_insensitively() {
        assert_eq!(image_extension("photo.PNG").as_deref(), Some("png"));
        assert_eq!(image_extension("a.b.JpEg").as_deref(), Some("jpeg"));
        assert_eq!(image_extension("x.gif").as_deref(), Some("gif"));
    }

    #[test]
    fn rejects_unknown_or_missing_extensions() {
        assert_eq!(image_extension("document.pdf"), None);
        assert_eq!(image_extension("archive.tar.gz"), None);
        assert_eq!(image_extension("noextension"), None);
    }
}
