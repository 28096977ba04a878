use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a published entry with a required cover image.
///
/// Posts are immutable after creation; there is no edit or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Filename of the cover image under the media root.
    pub cover: String,
    pub published_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl Post {
    /// Create a new post owned by `user_id`, published now.
    pub fn new(user_id: Uuid, title: &str, description: &str, cover: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.trim().to_owned(),
            description: description.trim().to_owned(),
            cover,
            published_at: Utc::now(),
            user_id,
        }
    }
}
