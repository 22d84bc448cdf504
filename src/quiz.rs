//! Quiz selection: picks the next question for a category, skipping
//! everything the player has already been served.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use sqlx::SqlitePool;

use crate::catalog::CatalogError;
use crate::db::queries::{categories, questions};
use crate::db::Question;

/// Picks a uniformly random question from the named category whose id is not
/// in `previous_questions`. Returns `Ok(None)` once the category is
/// exhausted.
pub async fn next_question(
    pool: &SqlitePool,
    category_type: &str,
    previous_questions: &[i64],
) -> Result<Option<Question>, CatalogError> {
    let category = categories::get_category_by_type(pool, category_type)
        .await?
        .ok_or(CatalogError::NotFound)?;

    let candidates = questions::get_questions_for_category(pool, category.id).await?;

    let served: HashSet<i64> = previous_questions.iter().copied().collect();
    let eligible: Vec<Question> = candidates
        .into_iter()
        .filter(|question| !served.contains(&question.id))
        .collect();

    Ok(eligible.choose(&mut rand::thread_rng()).cloned())
}
