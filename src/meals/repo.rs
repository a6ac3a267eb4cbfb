use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::meals::repo_types::{Meal, MealChanges, MealCounts, NewMeal};

pub async fn insert(db: &PgPool, meal: &NewMeal) -> anyhow::Result<Meal> {
    let row = sqlx::query_as::<_, Meal>(
        r#"
        INSERT INTO meals (id, user_id, name, description, is_on_the_diet)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, name, description, is_on_the_diet, created_at, updated_at
        "#,
    )
    .bind(meal.id)
    .bind(meal.user_id)
    .bind(&meal.name)
    .bind(&meal.description)
    .bind(meal.is_on_the_diet)
    .fetch_one(db)
    .await
    .context("insert meal")?;
    Ok(row)
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, user_id, name, description, is_on_the_diet, created_at, updated_at
        FROM meals
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list meals by user")?;
    Ok(rows)
}

/// Ownership filter: the row must match both `meal_id` and `user_id`.
pub async fn find_owned(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, user_id, name, description, is_on_the_diet, created_at, updated_at
        FROM meals
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(meal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("find meal")?;
    Ok(row)
}

pub async fn update_owned(
    db: &PgPool,
    user_id: Uuid,
    meal_id: Uuid,
    changes: &MealChanges,
) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(
        r#"
        UPDATE meals
           SET name = $3, description = $4, is_on_the_diet = $5, updated_at = now()
         WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, description, is_on_the_diet, created_at, updated_at
        "#,
    )
    .bind(meal_id)
    .bind(user_id)
    .bind(&changes.name)
    .bind(&changes.description)
    .bind(changes.is_on_the_diet)
    .fetch_optional(db)
    .await
    .context("update meal")?;
    Ok(row)
}

/// Returns whether a row was removed.
pub async fn delete_owned(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM meals WHERE id = $1 AND user_id = $2"#)
        .bind(meal_id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete meal")?;
    Ok(res.rows_affected() > 0)
}

/// Total, on-diet and off-diet counts in one statement, so the three numbers
/// always come from the same snapshot.
pub async fn counts_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<MealCounts> {
    let counts = sqlx::query_as::<_, MealCounts>(
        r#"
        SELECT COUNT(id)                                     AS total,
               COUNT(id) FILTER (WHERE is_on_the_diet)       AS on_diet,
               COUNT(id) FILTER (WHERE NOT is_on_the_diet)   AS off_diet
        FROM meals
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(db)
    .await
    .context("count meals")?;
    Ok(counts)
}
