//! # Tinta Shared
//!
//! Request/response types shared by the API server and its clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
