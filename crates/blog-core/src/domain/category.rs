use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - posts are grouped under categories.
///
/// Categories carry no owner; any caller may create or list them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}
