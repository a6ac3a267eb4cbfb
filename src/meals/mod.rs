mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

use crate::{session::guard::require_session, state::AppState};
use axum::{middleware, Router};

/// Every meal route sits behind the session guard.
pub fn router(state: &AppState) -> Router<AppState> {
    handlers::meals_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
}
