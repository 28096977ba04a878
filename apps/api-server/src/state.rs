//! Application state - shared across all handlers.

use std::path::Path;
use std::sync::Arc;

use sea_orm::{DbConn, DbErr};

use tinta_core::ports::{
    MediaStore, PasswordService, PostRepository, SessionCodec, UserRepository,
};
use tinta_infra::{
    Argon2PasswordService, FsMediaStore, JwtSessionCodec, PostgresPostRepository,
    PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub media: Arc<dyn MediaStore>,
    pub sessions: Arc<dyn SessionCodec>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Connect to the database and build the application state.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let db = tinta_infra::connect(&config.database).await?;
        tracing::info!("Application state initialized");

        Ok(Self::with_connection(db, &config.media_root))
    }

    /// Wire the repositories and services over an existing connection.
    pub fn with_connection(db: DbConn, media_root: &Path) -> Self {
        let db = Arc::new(db);
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db)),
            media: Arc::new(FsMediaStore::new(media_root)),
            sessions: Arc::new(JwtSessionCodec::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }
}
