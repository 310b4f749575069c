use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post. Only published posts are visible to
/// anonymous and non-staff readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

/// Post entity - a blog article under a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub status: PostStatus,
}

/// Fields a caller may change on an existing post. The author and creation
/// timestamp are deliberately absent: they are fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<PostStatus>,
}

impl Post {
    /// Create a new draft post. The author is always the acting principal;
    /// there is no way to create a post on someone else's behalf.
    pub fn new(author_id: Uuid, title: String, content: String, category_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            category_id,
            author_id,
            created_at: Utc::now(),
            status: PostStatus::Draft,
        }
    }

    /// Apply an update in place. `author_id` and `created_at` are preserved
    /// no matter what the caller supplied.
    pub fn apply(&mut self, update: PostUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}
