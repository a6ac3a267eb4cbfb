use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::repo_types::User;
use crate::validation::{is_valid_email, require_measure, require_text, Validate};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub weight: f64,
    pub height: f64,
}

impl Validate for RegisterRequest {
    fn validate(&mut self) -> Result<(), ApiError> {
        require_text("name", &mut self.name)?;
        require_text("address", &mut self.address)?;

        self.email = self.email.trim().to_lowercase();
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation("invalid email".into()));
        }

        // Column precision: weight NUMERIC(5,2), height NUMERIC(3,0).
        self.weight = (self.weight * 100.0).round() / 100.0;
        self.height = self.height.round();
        require_measure("weight", self.weight, 1000.0)?;
        require_measure("height", self.height, 1000.0)?;
        Ok(())
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub weight: f64,
    pub height: f64,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            address: u.address,
            weight: u.weight,
            height: u.height,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: PublicUser,
}
