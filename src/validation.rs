//! Request-body and path validation.
//!
//! Handlers never see framework rejections: malformed JSON, wrong field types
//! and malformed ids are all turned into `ApiError::Validation` (HTTP 400).

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;

/// Implemented by request DTOs. May normalize fields in place.
pub trait Validate {
    fn validate(&mut self) -> Result<(), ApiError>;
}

/// JSON body that has been deserialized and validated.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            warn!(error = %e.body_text(), "rejected request body");
            ApiError::Validation(e.body_text())
        })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// The `:id` path segment of a meal route, parsed as a UUID.
pub struct MealId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for MealId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        let id = Uuid::parse_str(&raw).map_err(|_| {
            warn!(id = %raw, "malformed meal id");
            ApiError::Validation("id must be a valid uuid".into())
        })?;
        Ok(Self(id))
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trims `value` in place and fails if nothing is left.
pub(crate) fn require_text(field: &str, value: &mut String) -> Result<(), ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
    Ok(())
}

/// Positive, finite and strictly below `max`.
pub(crate) fn require_measure(field: &str, value: f64, max: f64) -> Result<(), ApiError> {
    if !value.is_finite() || value <= 0.0 || value >= max {
        return Err(ApiError::Validation(format!(
            "{field} must be a positive number below {max}"
        )));
    }
    Ok(())
}
