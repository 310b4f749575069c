//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DbConn;

use blog_core::ports::{CategoryRepository, PostRepository, TokenBlacklist, UserRepository};
use blog_infra::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresTokenBlacklist,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub blacklist: Arc<dyn TokenBlacklist>,
    /// Whether the refresh cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    /// Build the application state over a database connection.
    pub fn new(db: DbConn, cookie_secure: bool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            blacklist: Arc::new(PostgresTokenBlacklist::new(db)),
            cookie_secure,
        }
    }
}
