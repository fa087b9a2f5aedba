use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::UserResponse;

/// Closed set of supported species. Stored as the `animal_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "animal_type", rename_all = "snake_case")]
pub enum AnimalType {
    Dog,
    Cat,
    Horse,
    Bird,
    Rabbit,
    Rodent,
    Reptile,
    Amphibian,
    Fish,
    Ferret,
    GuineaPig,
    Hamster,
    ExoticMammal,
    FarmLivestock,
    Other,
}

#[derive(Debug, Clone, FromRow)]
pub struct Animal {
    pub id: Uuid,
    pub identifier: Option<String>,
    pub name: String,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub animal_type: AnimalType,
    pub color: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub date_of_birth: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
    pub active: bool,
    pub road: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateAnimalRequest {
    pub name: String,
    pub animal_type: AnimalType,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnimalRequest {
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub animal_type: Option<AnimalType>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub active: Option<bool>,
    pub road: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnimalResponse {
    pub id: Uuid,
    pub name: String,
    pub animal_type: AnimalType,
    pub date_of_birth: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
    pub active: bool,
    pub identifier: Option<String>,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub version: i32,
    pub owners: Vec<UserResponse>,
}

impl AnimalResponse {
    pub fn from_parts(animal: Animal, owners: Vec<UserResponse>) -> Self {
        Self {
            id: animal.id,
            name: animal.name,
            animal_type: animal.animal_type,
            date_of_birth: animal.date_of_birth,
            date_of_death: animal.date_of_death,
            active: animal.active,
            identifier: animal.identifier,
            sex: animal.sex,
            height: animal.height,
            color: animal.color,
            description: animal.description,
            image: animal.image,
            version: animal.version,
            owners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animal_type_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&AnimalType::GuineaPig).unwrap(),
            "\"guinea_pig\""
        );
        assert_eq!(
            serde_json::to_string(&AnimalType::Dog).unwrap(),
            "\"dog\""
        );
    }

    #[test]
    fn unknown_animal_type_is_rejected() {
        assert!(serde_json::from_str::<AnimalType>("\"dragon\"").is_err());
    }
}
