use anyhow::Context;
use sqlx::PgPool;

use crate::users::repo_types::{InsertUser, NewUser, User};

const SESSION_ID_KEY: &str = "users_session_id_key";

/// Insert a user unless the email is already registered.
///
/// Relies on the unique index over `users.email`, so concurrent registrations
/// with the same email cannot both succeed. A clash on `users_session_id_key`
/// is reported as `SessionTaken` rather than an error.
pub async fn insert_if_email_free(db: &PgPool, user: &NewUser) -> anyhow::Result<InsertUser> {
    let res = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, address, weight, height, session_id)
        VALUES ($1, $2, $3, $4, $5::float8, $6::float8, $7)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, name, email, address,
                  weight::float8 AS weight, height::float8 AS height,
                  session_id, created_at
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.address)
    .bind(user.weight)
    .bind(user.height)
    .bind(user.session_id.as_deref())
    .fetch_optional(db)
    .await;

    match res {
        Ok(Some(row)) => Ok(InsertUser::Created(row)),
        Ok(None) => Ok(InsertUser::EmailTaken),
        Err(sqlx::Error::Database(e)) if e.constraint() == Some(SESSION_ID_KEY) => {
            Ok(InsertUser::SessionTaken)
        }
        Err(e) => Err(anyhow::Error::new(e).context("insert user")),
    }
}

/// Find the user owning a session cookie value.
pub async fn find_by_session(db: &PgPool, session_id: &str) -> anyhow::Result<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, address,
               weight::float8 AS weight, height::float8 AS height,
               session_id, created_at
        FROM users
        WHERE session_id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(db)
    .await
    .context("find user by session")?;
    Ok(row)
}
