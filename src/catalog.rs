//! Catalog operations over categories and questions: listing, pagination,
//! substring search, category-scoped listing, and the add/delete contracts.

use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::queries::{categories, questions};
use crate::db::{Category, Question};

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("object not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: String,
}

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, CatalogError> {
    Ok(categories::get_all_categories(pool).await?)
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<Category, CatalogError> {
    categories::get_category(pool, id)
        .await?
        .ok_or(CatalogError::NotFound)
}

/// Returns one page of questions together with the total question count and
/// the full category set.
///
/// The page window starts at zero-based offset `page - 1` and spans
/// [`QUESTIONS_PER_PAGE`] items, so consecutive pages overlap: page 2 starts
/// one item after page 1, not ten. A page is valid iff
/// `1 <= page <= total - 1`.
pub async fn list_questions(pool: &SqlitePool, page: i64) -> Result<QuestionsPage, CatalogError> {
    let questions = questions::get_all_questions(pool).await?;
    let categories = categories::get_all_categories(pool).await?;
    let total_questions = questions.len() as i64;

    if page < 1 || page > total_questions - 1 {
        return Err(CatalogError::NotFound);
    }

    let start = (page - 1) as usize;
    let end = usize::min(start + QUESTIONS_PER_PAGE, questions.len());

    Ok(QuestionsPage {
        questions: questions[start..end].to_vec(),
        total_questions,
        categories,
    })
}

/// Case-insensitive substring search over question text. The total reported
/// alongside the matches is the count of every stored question, not the
/// match count.
pub async fn search_questions(
    pool: &SqlitePool,
    term: &str,
) -> Result<SearchResults, CatalogError> {
    let questions = questions::search_questions(pool, term).await?;
    let total_questions = questions::count_questions(pool).await?;

    Ok(SearchResults {
        questions,
        total_questions,
    })
}

pub async fn list_questions_by_category(
    pool: &SqlitePool,
    category_id: i64,
) -> Result<CategoryQuestions, CatalogError> {
    let category = categories::get_category(pool, category_id)
        .await?
        .ok_or(CatalogError::NotFound)?;

    let questions = questions::get_questions_for_category(pool, category.id).await?;
    let total_questions = questions::count_questions(pool).await?;

    Ok(CategoryQuestions {
        questions,
        total_questions,
        current_category: category.kind,
    })
}

pub async fn add_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: i64,
    difficulty: i64,
) -> Result<i64, CatalogError> {
    Ok(questions::create_question(pool, question, answer, category, difficulty).await?)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<(), CatalogError> {
    questions::get_question_by_id(pool, id)
        .await?
        .ok_or(CatalogError::NotFound)?;

    questions::delete_question(pool, id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    async fn seed_question(pool: &SqlitePool, id: i64, question: &str, category: i64) {
        sqlx::query(
            "INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, 3)",
        )
        .bind(id)
        .bind(question)
        .bind(format!("answer to {question}"))
        .bind(category)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn seed_numbered_questions(pool: &SqlitePool, count: i64) {
        for n in 1..=count {
            seed_question(pool, n, &format!("Question number {n}?"), (n - 1) % 6 + 1).await;
        }
    }

    #[tokio::test]
    async fn categories_are_seeded_in_id_order() {
        let pool = test_pool().await;
        let categories = list_categories(&pool).await.unwrap();

        let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(categories[1].kind, "Art");
    }

    #[tokio::test]
    async fn get_category_resolves_known_ids_only() {
        let pool = test_pool().await;

        assert_eq!(get_category(&pool, 1).await.unwrap().kind, "Science");
        assert!(matches!(
            get_category(&pool, 99).await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            get_category(&pool, 0).await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            get_category(&pool, -3).await,
            Err(CatalogError::NotFound)
        ));
    }

    #[tokio::test]
    async fn first_page_starts_at_the_first_question() {
        let pool = test_pool().await;
        seed_numbered_questions(&pool, 25).await;

        let page = list_questions(&pool, 1).await.unwrap();
        assert_eq!(page.questions.len(), QUESTIONS_PER_PAGE);
        assert_eq!(page.questions[0].id, 1);
        assert_eq!(page.total_questions, 25);
        assert_eq!(page.categories.len(), 6);
    }

    #[tokio::test]
    async fn page_windows_advance_by_one_item() {
        let pool = test_pool().await;
        seed_numbered_questions(&pool, 25).await;

        let page = list_questions(&pool, 2).await.unwrap();
        assert_eq!(page.questions[0].id, 2);
        assert_eq!(page.questions.len(), QUESTIONS_PER_PAGE);

        let page = list_questions(&pool, 3).await.unwrap();
        assert_eq!(page.questions[0].id, 3);
    }

    #[tokio::test]
    async fn page_bounds_are_total_minus_one() {
        let pool = test_pool().await;
        seed_numbered_questions(&pool, 25).await;

        // last valid page: window is clamped to the end of the set
        let page = list_questions(&pool, 24).await.unwrap();
        assert_eq!(page.questions.len(), 2);
        assert_eq!(page.questions[0].id, 24);

        assert!(matches!(
            list_questions(&pool, 25).await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            list_questions(&pool, 0).await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            list_questions(&pool, -1).await,
            Err(CatalogError::NotFound)
        ));
    }

    #[tokio::test]
    async fn pagination_of_an_empty_store_is_not_found() {
        let pool = test_pool().await;

        assert!(matches!(
            list_questions(&pool, 1).await,
            Err(CatalogError::NotFound)
        ));
    }

    #[tokio::test]
    async fn empty_search_term_matches_every_question() {
        let pool = test_pool().await;
        seed_numbered_questions(&pool, 12).await;

        let results = search_questions(&pool, "").await.unwrap();
        assert_eq!(results.questions.len(), 12);
        assert_eq!(results.total_questions, 12);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_reports_store_total() {
        let pool = test_pool().await;
        seed_question(&pool, 1, "Whose autobiography is entitled Me?", 2).await;
        seed_question(&pool, 2, "What movie earned Tom Hanks his third Oscar?", 5).await;
        seed_question(&pool, 3, "Who invented peanut butter?", 1).await;

        let results = search_questions(&pool, "AUTOBIOGRAPHY").await.unwrap();
        assert_eq!(results.questions.len(), 1);
        assert_eq!(results.questions[0].id, 1);
        // total is the whole store, not the match count
        assert_eq!(results.total_questions, 3);

        let results = search_questions(&pool, "who").await.unwrap();
        assert_eq!(results.questions.len(), 2);

        let results = search_questions(&pool, "flour").await.unwrap();
        assert!(results.questions.is_empty());
        assert_eq!(results.total_questions, 3);
    }

    #[tokio::test]
    async fn search_never_matches_answer_text() {
        let pool = test_pool().await;
        seed_question(&pool, 1, "What is the largest lake in Africa?", 3).await;

        // answers contain the question text, so search on a word unique to answers
        let results = search_questions(&pool, "answer to").await.unwrap();
        assert!(results.questions.is_empty());
    }

    #[tokio::test]
    async fn category_listing_filters_to_that_category() {
        let pool = test_pool().await;
        seed_question(&pool, 1, "La Giaconda is better known as what?", 2).await;
        seed_question(&pool, 2, "Which Dutch painter cut off his own ear?", 2).await;
        seed_question(&pool, 3, "What boxer's original name is Cassius Clay?", 4).await;

        let listing = list_questions_by_category(&pool, 2).await.unwrap();
        assert_eq!(listing.current_category, "Art");
        assert!(listing.questions.iter().all(|q| q.category == 2));
        assert_eq!(listing.questions.len(), 2);
        assert_eq!(listing.total_questions, 3);
    }

    #[tokio::test]
    async fn category_listing_rejects_unknown_categories() {
        let pool = test_pool().await;

        assert!(matches!(
            list_questions_by_category(&pool, 42).await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            list_questions_by_category(&pool, -1).await,
            Err(CatalogError::NotFound)
        ));
    }

    #[tokio::test]
    async fn added_question_is_stored_with_a_fresh_id() {
        let pool = test_pool().await;

        let id = add_question(&pool, "What is the heaviest organ?", "The skin", 1, 4)
            .await
            .unwrap();

        let stored = questions::get_question_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(stored.question, "What is the heaviest organ?");
        assert_eq!(stored.answer, "The skin");
        assert_eq!(stored.category, 1);
        assert_eq!(stored.difficulty, 4);

        let matches = questions::search_questions(&pool, "heaviest organ")
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, id);
    }

    #[tokio::test]
    async fn deleted_question_is_gone() {
        let pool = test_pool().await;
        seed_question(&pool, 7, "What is the capital of Peru?", 3).await;

        delete_question(&pool, 7).await.unwrap();

        assert!(questions::get_question_by_id(&pool, 7)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn deleting_a_missing_question_changes_nothing() {
        let pool = test_pool().await;
        seed_question(&pool, 1, "What is the capital of Peru?", 3).await;

        assert!(matches!(
            delete_question(&pool, 500).await,
            Err(CatalogError::NotFound)
        ));
        assert_eq!(questions::count_questions(&pool).await.unwrap(), 1);
    }
}
