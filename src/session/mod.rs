//! Cookie-based sessions.
//!
//! A session is an opaque token stored in `users.session_id` and echoed back
//! by the client in a cookie scoped to `/meals`.

pub mod extractors;
pub mod guard;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::{SessionConfig, MAX_SESSION_TTL_DAYS};

pub const COOKIE_PATH: &str = "/meals";

/// Fresh random session token.
pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

/// Value of the named cookie, if present and non-empty.
pub fn read_cookie(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Cookie establishing `token` as the session.
pub fn session_cookie(cfg: &SessionConfig, token: &str) -> Cookie<'static> {
    let max_age = Duration::days(cfg.ttl_days.clamp(1, MAX_SESSION_TTL_DAYS));
    let mut builder = Cookie::build((cfg.cookie_name.clone(), token.to_string()))
        .path(COOKIE_PATH)
        .max_age(max_age)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cfg.secure);
    if let Some(expires) = OffsetDateTime::now_utc().checked_add(max_age) {
        builder = builder.expires(expires);
    }
    builder.build()
}
