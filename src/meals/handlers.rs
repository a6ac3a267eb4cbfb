use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    meals::{
        dto::{MealListResponse, MealRequest, MealResponse, SummaryResponse},
        repo_types::NewMeal,
        services,
    },
    session::extractors::SessionUser,
    state::AppState,
    validation::{MealId, ValidJson},
};

pub fn meals_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/summary", get(summary))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    ValidJson(payload): ValidJson<MealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MealResponse>), ApiError> {
    let meal = state
        .store
        .insert_meal(NewMeal {
            id: Uuid::new_v4(),
            user_id,
            name: payload.name,
            description: payload.description,
            is_on_the_diet: payload.is_on_the_diet,
        })
        .await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/meals/{}", meal.id)) {
        headers.insert(header::LOCATION, location);
    }

    info!(%user_id, meal_id = %meal.id, "meal created");
    Ok((StatusCode::CREATED, headers, Json(MealResponse { meal })))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<MealListResponse>, ApiError> {
    let meals = state.store.list_meals(user_id).await?;
    Ok(Json(MealListResponse { meals }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    MealId(id): MealId,
) -> Result<Json<MealResponse>, ApiError> {
    match state.store.find_meal(user_id, id).await? {
        Some(meal) => Ok(Json(MealResponse { meal })),
        None => {
            warn!(%user_id, %id, "meal not found");
            Err(ApiError::MealNotFound)
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    MealId(id): MealId,
    ValidJson(payload): ValidJson<MealRequest>,
) -> Result<(StatusCode, Json<MealResponse>), ApiError> {
    let Some(meal) = state.store.update_meal(user_id, id, payload.into()).await? else {
        warn!(%user_id, %id, "update of missing or foreign meal");
        return Err(ApiError::MealNotFound);
    };
    info!(%user_id, meal_id = %meal.id, "meal updated");
    Ok((StatusCode::ACCEPTED, Json(MealResponse { meal })))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    MealId(id): MealId,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_meal(user_id, id).await? {
        warn!(%user_id, %id, "delete of missing or foreign meal");
        return Err(ApiError::MealNotFound);
    }
    info!(%user_id, meal_id = %id, "meal deleted");
    Ok(StatusCode::ACCEPTED)
}

#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = services::summarize(state.store.as_ref(), user_id).await?;
    Ok(Json(SummaryResponse { summary }))
}
