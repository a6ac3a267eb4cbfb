use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::read_cookie;
use crate::{error::ApiError, state::AppState};

/// Rejects requests without a session cookie before any handler runs.
/// Does not touch the store; `SessionUser` resolves the cookie later.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());
    if read_cookie(&jar, &state.config.session.cookie_name).is_none() {
        warn!(method = %req.method(), path = %req.uri().path(), "missing session cookie");
        return Err(ApiError::Unauthorized("missing session cookie"));
    }
    Ok(next.run(req).await)
}
