//! Post handlers.
//!
//! The list view returns published posts for everyone, staff included. The
//! detail view lets staff see drafts; for anyone else a draft is a 404,
//! indistinguishable from a post that does not exist.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{Post, PostStatus, PostUpdate};
use blog_core::policy;
use blog_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        category_id: post.category_id,
        author: post.author_id,
        created_at: post.created_at.to_rfc3339(),
        status: post.status.as_str().to_string(),
    }
}

fn parse_status(s: &str) -> Result<PostStatus, AppError> {
    PostStatus::parse(s)
        .ok_or_else(|| AppError::validation("status", format!("\"{}\" is not a valid choice.", s)))
}

/// GET /
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_published().await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(to_response).collect::<Vec<_>>()))
}

/// POST /
///
/// The author is always the authenticated caller; any author field in the
/// payload is ignored.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let status = parse_status(&req.status)?;

    if state.categories.find_by_id(req.category_id).await?.is_none() {
        return Err(AppError::validation("category", "Invalid category."));
    }

    let mut post = Post::new(identity.user_id, req.title, req.content, req.category_id);
    post.status = status;

    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, author = %identity.username, "Post created");

    Ok(HttpResponse::Created().json(to_response(saved)))
}

/// GET /{id}/
pub async fn get(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .filter(|post| policy::can_view_post(identity.principal().as_ref(), post))
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT/PATCH /{id}/
///
/// Author-only. The stored author survives the update no matter what the
/// payload says.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !policy::can_edit_post(&identity.principal(), &post) {
        return Err(AppError::Forbidden);
    }

    let status = req.status.as_deref().map(parse_status).transpose()?;

    if let Some(category_id) = req.category_id {
        if state.categories.find_by_id(category_id).await?.is_none() {
            return Err(AppError::validation("category", "Invalid category."));
        }
    }

    post.apply(PostUpdate {
        title: req.title,
        content: req.content,
        category_id: req.category_id,
        status,
    });

    let saved = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(to_response(saved)))
}

/// DELETE /{id}/
///
/// Staff or the author may delete; any other authenticated caller gets 403.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !policy::can_delete_post(&identity.principal(), &post) {
        return Err(AppError::Forbidden);
    }

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = %id, by = %identity.username, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
