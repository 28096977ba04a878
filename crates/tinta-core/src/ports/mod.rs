//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod storage;

pub use auth::{AuthError, PasswordService, SessionClaims, SessionCodec};
pub use repository::{BaseRepository, PostRepository, UserRepository};
pub use storage::{ALLOWED_IMAGE_EXTENSIONS, MediaStore, StorageError, image_extension};
