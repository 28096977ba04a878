//! # Tinta Infrastructure
//!
//! Concrete implementations of the ports defined in `tinta-core`:
//! SeaORM repositories over Postgres, Argon2 password hashing, the
//! JWT-signed session cookie codec, and the filesystem media store.

pub mod auth;
pub mod database;
pub mod storage;

pub use auth::{Argon2PasswordService, JwtSessionCodec, SessionConfig};
pub use database::{DatabaseConfig, PostgresPostRepository, PostgresUserRepository, connect};
pub use storage::FsMediaStore;
