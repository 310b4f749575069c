use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn insert(&self, user: User) -> Result<User, RepoError>;
}

/// Category repository. Deleting a category still referenced by posts fails
/// with a constraint violation (the store protects on delete).
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError>;

    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    async fn insert(&self, category: Category) -> Result<Category, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Published posts only, in store order. Every caller gets this view,
    /// staff included.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Revoked refresh tokens, keyed by `jti`.
///
/// A revocation must be visible to any validation that starts after the
/// insert returns (read-your-writes through the store).
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<(), RepoError>;

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, RepoError>;
}
