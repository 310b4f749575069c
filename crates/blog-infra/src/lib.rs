//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! PostgreSQL repositories via SeaORM, JWT token issuance, and Argon2
//! password hashing.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, PostgresCategoryRepository, PostgresPostRepository,
    PostgresTokenBlacklist, PostgresUserRepository, connect,
};
