//! Domain entities.

mod category;
mod post;
mod user;

pub use category::Category;
pub use post::{Post, PostStatus, PostUpdate};
pub use user::User;
