//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tinta_core::domain::{Post, User};

/// Request to register a new user. Field names match the registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Credentials/contact update form. Only `old_password` is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityUpdateRequest {
    #[serde(default)]
    pub old_password: String,
    pub new_password: Option<String>,
    pub new_password_confirm: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Personal-account profile form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub full_name: String,
    /// Expected as `YYYY-MM-DD`; anything else is silently ignored.
    pub birthdate: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub about: String,
}

/// Success payload carrying a human-readable message and, where the client
/// is expected to navigate, a redirect target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect: None,
        }
    }

    pub fn with_redirect(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect: Some(redirect.into()),
        }
    }
}

/// Avatar upload result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarResponse {
    pub success: bool,
    pub new_avatar_url: String,
}

/// A user's public profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar: Option<String>,
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            city: user.city,
            date_of_birth: user.date_of_birth,
            avatar: user.avatar,
            about: user.about,
            created_at: user.created_at,
        }
    }
}

/// A post as shown in feeds and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub cover: String,
    pub published_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            cover: post.cover,
            published_at: post.published_at,
            user_id: post.user_id,
        }
    }
}

/// Home feed: every post newest-first, plus the viewer if logged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePage {
    pub posts: Vec<PostResponse>,
    pub user: Option<UserResponse>,
}

/// A user's public page: the profile plus their posts newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePage {
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
}
