//! Database connection management and PostgreSQL repositories.

mod connections;
pub mod entity;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresTokenBlacklist,
    PostgresUserRepository,
};

#[cfg(test)]
mod tests;
