use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait for the operations every entity supports.
/// There is no delete: neither users nor posts are ever removed.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. A uniqueness violation surfaces as
    /// [`RepoError::Conflict`] carrying the violated constraint name.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by exact username match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// True if `email` already belongs to a user other than `user_id`.
    async fn email_taken_by_other(&self, email: &str, user_id: Uuid) -> Result<bool, RepoError>;

    /// Persist every column of an existing user as one UPDATE.
    async fn update(&self, user: User) -> Result<User, RepoError>;
}

/// Post repository. Posts are insert-only; both listings come back newest
/// first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Every post, ordered by publication time descending.
    async fn find_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// One user's posts, ordered by publication time descending.
    async fn find_by_user_recent(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
