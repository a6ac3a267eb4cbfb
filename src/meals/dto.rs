use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::meals::repo_types::{Meal, MealChanges};
use crate::validation::{require_text, Validate};

/// Body of both POST /meals and PUT /meals/:id.
#[derive(Debug, Deserialize)]
pub struct MealRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "isOnTheDiet")]
    pub is_on_the_diet: bool,
}

impl Validate for MealRequest {
    fn validate(&mut self) -> Result<(), ApiError> {
        require_text("name", &mut self.name)?;
        self.description = self.description.trim().to_string();
        Ok(())
    }
}

impl From<MealRequest> for MealChanges {
    fn from(r: MealRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            is_on_the_diet: r.is_on_the_diet,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Meal,
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_meals: i64,
    pub meals_on_diet: i64,
    pub meals_off_diet: i64,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: Summary,
}
