use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Meal record in the database; also the JSON shape returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_the_diet: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_the_diet: bool,
}

/// Fields overwritten by an update.
#[derive(Debug, Clone)]
pub struct MealChanges {
    pub name: String,
    pub description: String,
    pub is_on_the_diet: bool,
}

/// Per-user meal counts taken from a single snapshot.
#[derive(Debug, Clone, Copy, FromRow, PartialEq, Eq)]
pub struct MealCounts {
    pub total: i64,
    pub on_diet: i64,
    pub off_diet: i64,
}
