use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::catalog::{self, CatalogError};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

// one POST endpoint serves both search and create, keyed on which body shape
// the client sent
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionsPost {
    Search {
        #[serde(rename = "searchTerm")]
        search_term: String,
    },
    Create {
        question: String,
        answer: String,
        category: i64,
        difficulty: i64,
    },
}

#[derive(Serialize)]
struct AddedResponse {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse {
    status_code: u16,
    id: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // an unparsable page parameter falls back to the first page
    let page = page.ok().and_then(|Query(query)| query.page).unwrap_or(1);
    let window = catalog::list_questions(&pool, page).await?;
    Ok(Json(window))
}

async fn process_questions(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuestionsPost>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::Unprocessable)?;

    match body {
        QuestionsPost::Search { search_term } => {
            let results = catalog::search_questions(&pool, &search_term).await?;
            Ok(Json(results).into_response())
        }
        QuestionsPost::Create {
            question,
            answer,
            category,
            difficulty,
        } => {
            catalog::add_question(&pool, &question, &answer, category, difficulty).await?;
            Ok(Json(AddedResponse {
                success: true,
                message: "Added successfully",
            })
            .into_response())
        }
    }
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::BadRequest)?;

    match catalog::delete_question(&pool, id).await {
        Ok(()) => Ok(Json(DeleteResponse {
            status_code: 200,
            id,
        })),
        Err(CatalogError::NotFound) => Err(ApiError::NotFound),
        // commit failure keeps the 200-shaped payload and reports the target
        // id alongside a statusCode of 500
        Err(CatalogError::Database(error)) => {
            tracing::error!("delete of question {id} failed to commit: {error}");
            Ok(Json(DeleteResponse {
                status_code: 500,
                id,
            }))
        }
    }
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1.0/questions",
            get(list_questions).post(process_questions),
        )
        .route("/api/v1.0/questions/{id}", delete(delete_question))
        .with_state(state)
}
