use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,               // trimmed, lowercase; unique index
    pub address: String,
    pub weight: f64,                 // NUMERIC(5,2), read back as float8
    pub height: f64,                 // NUMERIC(3,0)
    #[serde(skip_serializing)]
    pub session_id: Option<String>,  // session cookie value, never exposed
    pub created_at: OffsetDateTime,
}

/// Values for a user row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub weight: f64,
    pub height: f64,
    pub session_id: Option<String>,
}

/// Outcome of a conditional user insert.
#[derive(Debug, Clone)]
pub enum InsertUser {
    Created(User),
    EmailTaken,
    /// Another user already holds the requested session id.
    SessionTaken,
}
