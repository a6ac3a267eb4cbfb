use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    session,
    state::AppState,
    store::Store,
    users::{
        dto::{RegisterRequest, RegisterResponse},
        repo_types::{InsertUser, NewUser, User},
    },
    validation::ValidJson,
};

const SESSION_ATTEMPTS: usize = 3;

pub fn users_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

/// POST /users
///
/// A presented session cookie that no user owns yet is adopted as the new
/// user's session; otherwise a fresh token is minted and sent back.
#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<RegisterResponse>), ApiError> {
    let cfg = &state.config.session;

    let adopted = match session::read_cookie(&jar, &cfg.cookie_name) {
        Some(token) => match state.store.find_user_by_session(&token).await? {
            None => Some(token),
            Some(_) => None,
        },
        None => None,
    };

    let new_user = NewUser {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email,
        address: payload.address,
        weight: payload.weight,
        height: payload.height,
        session_id: None,
    };

    let (user, minted) = insert_with_session(state.store.as_ref(), new_user, adopted).await?;

    let jar = match minted {
        Some(token) => jar.add(session::session_cookie(cfg, &token)),
        None => jar,
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        jar,
        Json(RegisterResponse { user: user.into() }),
    ))
}

/// Inserts `user` with the adopted session token, or a freshly minted one.
///
/// If another registration claims the same token first, a new token is
/// minted and the insert retried. Returns the token to hand back to the
/// client when it differs from what the client presented.
async fn insert_with_session(
    store: &dyn Store,
    mut user: NewUser,
    adopted: Option<String>,
) -> Result<(User, Option<String>), ApiError> {
    let mut minted = None;
    let token = adopted.unwrap_or_else(|| {
        let t = session::new_token();
        minted = Some(t.clone());
        t
    });
    user.session_id = Some(token);

    for _ in 0..SESSION_ATTEMPTS {
        match store.insert_user_if_email_free(user.clone()).await? {
            InsertUser::Created(u) => return Ok((u, minted)),
            InsertUser::EmailTaken => {
                warn!("email already registered");
                return Err(ApiError::EmailTaken);
            }
            InsertUser::SessionTaken => {
                warn!("session id claimed concurrently; minting a new one");
                let t = session::new_token();
                user.session_id = Some(t.clone());
                minted = Some(t);
            }
        }
    }
    Err(ApiError::Internal(anyhow::anyhow!(
        "no unique session id after {SESSION_ATTEMPTS} attempts"
    )))
}
