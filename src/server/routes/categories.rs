use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::catalog::{self, CategoryQuestions};
use crate::db::Category;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Serialize)]
struct CategoriesResponse {
    categories: Vec<Category>,
}

async fn get_categories(State(pool): State<SqlitePool>) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = catalog::list_categories(&pool).await?;
    Ok(Json(CategoriesResponse { categories }))
}

async fn get_category(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Category>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::BadRequest)?;
    Ok(Json(catalog::get_category(&pool, id).await?))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CategoryQuestions>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::BadRequest)?;
    Ok(Json(catalog::list_questions_by_category(&pool, id).await?))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1.0/categories", get(get_categories))
        .route("/api/v1.0/categories/{id}", get(get_category))
        .route(
            "/api/v1.0/categories/{id}/questions",
            get(get_category_questions),
        )
        .with_state(state)
}
