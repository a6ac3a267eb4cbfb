use uuid::Uuid;

use crate::meals::dto::Summary;
use crate::store::Store;

/// Recomputed on every call; the store reads all three counts at once.
pub async fn summarize(store: &dyn Store, user_id: Uuid) -> anyhow::Result<Summary> {
    let counts = store.meal_counts(user_id).await?;
    Ok(Summary {
        total_meals: counts.total,
        meals_on_diet: counts.on_diet,
        meals_off_diet: counts.off_diet,
    })
}
