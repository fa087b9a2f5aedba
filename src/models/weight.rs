use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::timestamp;

#[derive(Debug, Clone, FromRow)]
pub struct WeightHistory {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub weight: f64,
    pub change_date: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[derive(Debug, Deserialize)]
pub struct WeightEntryRequest {
    pub weight: f64,
    #[serde(with = "timestamp::naive")]
    pub change_date: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct WeightEntryResponse {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub weight: f64,
    pub change_date: NaiveDateTime,
    pub version: i32,
}

impl From<WeightHistory> for WeightEntryResponse {
    fn from(entry: WeightHistory) -> Self {
        Self {
            id: entry.id,
            animal_id: entry.animal_id,
            weight: entry.weight,
            change_date: entry.change_date,
            version: entry.version,
        }
    }
}
