//! Ports - trait interfaces implemented by the infrastructure layer.

mod auth;
mod repository;

pub use auth::{
    AccessClaims, AuthError, PasswordService, RefreshClaims, TokenService,
};
pub use repository::{
    CategoryRepository, PostRepository, TokenBlacklist, UserRepository,
};
