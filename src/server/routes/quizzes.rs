use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::Question;
use crate::quiz;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::telemetry::QUIZ_QUESTION_CNTR;

#[derive(Deserialize)]
struct QuizBody {
    previous_questions: Vec<i64>,
    quiz_category: String,
}

#[derive(Serialize)]
struct QuizResponse {
    question: Option<Question>,
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizBody>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::Unprocessable)?;

    let question =
        quiz::next_question(&pool, &body.quiz_category, &body.previous_questions).await?;
    if question.is_some() {
        QUIZ_QUESTION_CNTR
            .with_label_values(&[body.quiz_category.as_str()])
            .inc();
    }

    Ok(Json(QuizResponse { question }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1.0/quizzes", post(next_quiz_question))
        .with_state(state)
}
