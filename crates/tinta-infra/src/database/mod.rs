//! Database connection management and repositories.

mod connections;
pub mod entity;
mod postgres_base;
mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use postgres_repo::{PostgresPostRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
