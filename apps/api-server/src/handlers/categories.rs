//! Category handlers. Categories have no owner; list and create are open.

use actix_web::{HttpResponse, web};

use blog_core::domain::Category;
use blog_shared::dto::{CategoryOption, CategoryResponse, CreateCategoryRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /category/
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;

    let body: Vec<CategoryResponse> = categories
        .into_iter()
        .map(|c| CategoryResponse {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /category/
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::validation("name", "This field is required."));
    }

    let saved = state.categories.insert(Category::new(req.name)).await?;

    Ok(HttpResponse::Created().json(CategoryResponse {
        id: saved.id,
        name: saved.name,
    }))
}

/// GET /categories/
///
/// `[{id, name}, ...]` projection for populating a dropdown.
pub async fn dropdown(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;

    let body: Vec<CategoryOption> = categories
        .into_iter()
        .map(|c| CategoryOption {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(body))
}
