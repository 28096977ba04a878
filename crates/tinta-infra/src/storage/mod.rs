//! Media storage implementations.

mod fs;

pub use fs::{AVATAR_DIR, FsMediaStore};
