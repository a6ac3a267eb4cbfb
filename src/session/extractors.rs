use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use uuid::Uuid;

use super::read_cookie;
use crate::{error::ApiError, state::AppState};

/// Resolves the session cookie to the owning user's id.
///
/// A cookie that matches no user is treated exactly like a missing one.
pub struct SessionUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = read_cookie(&jar, &state.config.session.cookie_name)
            .ok_or(ApiError::Unauthorized("missing session cookie"))?;

        match state.store.find_user_by_session(&token).await? {
            Some(user) => Ok(SessionUser(user.id)),
            None => {
                warn!("session cookie does not match any user");
                Err(ApiError::Unauthorized("unknown session"))
            }
        }
    }
}
