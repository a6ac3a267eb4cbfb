use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::meals::repo_types::{Meal, MealChanges, MealCounts, NewMeal};
use crate::users::repo_types::{InsertUser, NewUser, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    meals: Vec<Meal>, // insertion order == creation order
}

/// In-process store with the same contract as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user_if_email_free(&self, user: NewUser) -> anyhow::Result<InsertUser> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.email == user.email) {
            return Ok(InsertUser::EmailTaken);
        }
        if let Some(sid) = user.session_id.as_deref() {
            if t.users.values().any(|u| u.session_id.as_deref() == Some(sid)) {
                return Ok(InsertUser::SessionTaken);
            }
        }
        let row = User {
            id: user.id,
            name: user.name,
            email: user.email,
            address: user.address,
            weight: user.weight,
            height: user.height,
            session_id: user.session_id,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.insert(row.id, row.clone());
        Ok(InsertUser::Created(row))
    }

    async fn find_user_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users
            .values()
            .find(|u| u.session_id.as_deref() == Some(session_id))
            .cloned())
    }

    async fn insert_meal(&self, meal: NewMeal) -> anyhow::Result<Meal> {
        let mut t = self.tables.write().await;
        anyhow::ensure!(
            t.users.contains_key(&meal.user_id),
            "meal owner {} does not exist",
            meal.user_id
        );
        let now = OffsetDateTime::now_utc();
        let row = Meal {
            id: meal.id,
            user_id: meal.user_id,
            name: meal.name,
            description: meal.description,
            is_on_the_diet: meal.is_on_the_diet,
            created_at: now,
            updated_at: now,
        };
        t.meals.push(row.clone());
        Ok(row)
    }

    async fn list_meals(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let t = self.tables.read().await;
        Ok(t.meals.iter().filter(|m| m.user_id == user_id).cloned().collect())
    }

    async fn find_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let t = self.tables.read().await;
        Ok(t.meals
            .iter()
            .find(|m| m.id == meal_id && m.user_id == user_id)
            .cloned())
    }

    async fn update_meal(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>> {
        let mut t = self.tables.write().await;
        let Some(meal) = t
            .meals
            .iter_mut()
            .find(|m| m.id == meal_id && m.user_id == user_id)
        else {
            return Ok(None);
        };
        meal.name = changes.name;
        meal.description = changes.description;
        meal.is_on_the_diet = changes.is_on_the_diet;
        meal.updated_at = OffsetDateTime::now_utc();
        Ok(Some(meal.clone()))
    }

    async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        let before = t.meals.len();
        t.meals.retain(|m| !(m.id == meal_id && m.user_id == user_id));
        Ok(t.meals.len() < before)
    }

    async fn meal_counts(&self, user_id: Uuid) -> anyhow::Result<MealCounts> {
        let t = self.tables.read().await;
        let (on_diet, off_diet) = t
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .fold((0, 0), |(on, off), m| {
                if m.is_on_the_diet {
                    (on + 1, off)
                } else {
                    (on, off + 1)
                }
            });
        Ok(MealCounts {
            total: on_diet + off_diet,
            on_diet,
            off_diet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, session: Option<&str>) -> NewUser {
        NewUser {
            id: Uuid::new_v4(),
            name: "m".into(),
            email: email.into(),
            address: "a".into(),
            weight: 80.5,
            height: 174.0,
            session_id: session.map(str::to_string),
        }
    }

    fn new_meal(user_id: Uuid, name: &str, on_diet: bool) -> NewMeal {
        NewMeal {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            description: "d".into(),
            is_on_the_diet: on_diet,
        }
    }

    async fn created(store: &MemoryStore, user: NewUser) -> User {
        match store.insert_user_if_email_free(user).await.unwrap() {
            InsertUser::Created(u) => u,
            other => panic!("expected Created, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let store = MemoryStore::new();
        created(&store, new_user("m@x.com", Some("s1"))).await;
        let second = store
            .insert_user_if_email_free(new_user("m@x.com", Some("s2")))
            .await
            .unwrap();
        assert!(matches!(second, InsertUser::EmailTaken));
    }

    #[tokio::test]
    async fn taken_session_is_reported_not_inserted() {
        let store = MemoryStore::new();
        let first = created(&store, new_user("a@x.com", Some("shared"))).await;
        let second = store
            .insert_user_if_email_free(new_user("b@x.com", Some("shared")))
            .await
            .unwrap();
        assert!(matches!(second, InsertUser::SessionTaken));
        let owner = store.find_user_by_session("shared").await.unwrap().unwrap();
        assert_eq!(owner.id, first.id);
    }

    #[tokio::test]
    async fn session_lookup_finds_owner() {
        let store = MemoryStore::new();
        let user = created(&store, new_user("m@x.com", Some("tok"))).await;
        let found = store.find_user_by_session("tok").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.find_user_by_session("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn meal_requires_existing_owner() {
        let store = MemoryStore::new();
        let err = store
            .insert_meal(new_meal(Uuid::new_v4(), "lunch", true))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn ownership_filter_applies_to_every_operation() {
        let store = MemoryStore::new();
        let a = created(&store, new_user("a@x.com", Some("a"))).await;
        let b = created(&store, new_user("b@x.com", Some("b"))).await;
        let meal = store.insert_meal(new_meal(a.id, "lunch", true)).await.unwrap();

        assert!(store.find_meal(b.id, meal.id).await.unwrap().is_none());
        let changes = MealChanges {
            name: "stolen".into(),
            description: String::new(),
            is_on_the_diet: false,
        };
        assert!(store.update_meal(b.id, meal.id, changes).await.unwrap().is_none());
        assert!(!store.delete_meal(b.id, meal.id).await.unwrap());

        let still = store.find_meal(a.id, meal.id).await.unwrap().unwrap();
        assert_eq!(still.name, "lunch");
        assert!(store.delete_meal(a.id, meal.id).await.unwrap());
        assert!(store.list_meals(a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn counts_split_by_diet_flag() {
        let store = MemoryStore::new();
        let u = created(&store, new_user("c@x.com", None)).await;
        for (name, flag) in [("a", true), ("b", false), ("c", true)] {
            store.insert_meal(new_meal(u.id, name, flag)).await.unwrap();
        }
        let counts = store.meal_counts(u.id).await.unwrap();
        assert_eq!(
            counts,
            MealCounts {
                total: 3,
                on_diet: 2,
                off_diet: 1
            }
        );
    }

    #[tokio::test]
    async fn counts_stay_consistent_during_concurrent_inserts() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let user_id = created(&store, new_user("busy@x.com", None)).await.id;

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    store
                        .insert_meal(new_meal(user_id, "m", i % 3 == 0))
                        .await
                        .unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        for _ in 0..200 {
            let c = store.meal_counts(user_id).await.unwrap();
            assert_eq!(c.total, c.on_diet + c.off_diet);
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();

        let c = store.meal_counts(user_id).await.unwrap();
        assert_eq!(c.total, 200);
        assert_eq!(c.total, c.on_diet + c.off_diet);
    }
}
