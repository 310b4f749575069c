//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_status() -> String {
    "draft".to_string()
}

/// Request to register a new user. The password is confirmed by typing it
/// twice; mismatches are rejected before anything is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Public user fields returned after registration. The password hash never
/// leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body. The refresh token is deliberately absent: it is set
/// as an HTTP-only cookie and must never appear in a JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub is_admin: bool,
}

/// Response to a successful token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Simple detail message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub detail: String,
}

/// Request to create a post. An `author` field, if supplied, is ignored:
/// the author is always the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub author: Option<Uuid>,
}

/// Request to update a post. All fields optional; `author` is accepted and
/// ignored, so a payload naming another author cannot hijack the post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<String>,
    #[serde(default)]
    pub author: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    pub author: Uuid,
    pub created_at: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

/// Lightweight `{id, name}` projection for populating UI dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: Uuid,
    pub name: String,
}
