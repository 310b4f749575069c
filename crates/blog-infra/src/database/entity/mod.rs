//! SeaORM entities mirroring the domain model.

pub mod category;
pub mod post;
pub mod revoked_token;
pub mod user;
