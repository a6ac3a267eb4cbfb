use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::Store;
use crate::config::AppConfig;
use crate::meals::{
    repo as meals_repo,
    repo_types::{Meal, MealChanges, MealCounts, NewMeal},
};
use crate::users::{
    repo as users_repo,
    repo_types::{InsertUser, NewUser, User},
};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user_if_email_free(&self, user: NewUser) -> anyhow::Result<InsertUser> {
        users_repo::insert_if_email_free(&self.db, &user).await
    }

    async fn find_user_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>> {
        users_repo::find_by_session(&self.db, session_id).await
    }

    async fn insert_meal(&self, meal: NewMeal) -> anyhow::Result<Meal> {
        meals_repo::insert(&self.db, &meal).await
    }

    async fn list_meals(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        meals_repo::list_by_user(&self.db, user_id).await
    }

    async fn find_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        meals_repo::find_owned(&self.db, user_id, meal_id).await
    }

    async fn update_meal(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>> {
        meals_repo::update_owned(&self.db, user_id, meal_id, &changes).await
    }

    async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        meals_repo::delete_owned(&self.db, user_id, meal_id).await
    }

    async fn meal_counts(&self, user_id: Uuid) -> anyhow::Result<MealCounts> {
        meals_repo::counts_by_user(&self.db, user_id).await
    }
}
