//! Persistence seam between the HTTP handlers and the database.
//!
//! `PgStore` is what the server runs on; `MemoryStore` backs
//! `AppState::fake()` so the full router can be exercised without Postgres.

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::meals::repo_types::{Meal, MealChanges, MealCounts, NewMeal};
use crate::users::repo_types::{InsertUser, NewUser, User};

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts `user` atomically with the duplicate-email and
    /// duplicate-session checks.
    async fn insert_user_if_email_free(&self, user: NewUser) -> anyhow::Result<InsertUser>;

    async fn find_user_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>>;

    async fn insert_meal(&self, meal: NewMeal) -> anyhow::Result<Meal>;

    async fn list_meals(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>>;

    async fn find_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>>;

    async fn update_meal(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>>;

    /// `false` when no meal with that id is owned by `user_id`.
    async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool>;

    /// Total, on-diet and off-diet counts read from one consistent snapshot.
    async fn meal_counts(&self, user_id: Uuid) -> anyhow::Result<MealCounts>;
}
