use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgHasArrayType;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::timestamp;

/// Closed set of activity tags, spanning clinical and day-to-day care events.
/// Stored as the `activity_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "activity_type", rename_all = "snake_case")]
pub enum ActivityType {
    CheckUp,
    Operation,
    Sale,
    Vaccination,
    Dental,
    Grooming,
    Emergency,
    Consultation,
    Imaging,
    Phone,
    Bath,
    Feces,
    Injury,
    Exercise,
    Food,
    Nails,
    Wash,
    Urine,
    Vomit,
    Deworming,
    Water,
    Sleep,
    Seizure,
    Season,
    Medication,
    Other,
}

impl PgHasArrayType for ActivityType {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_activity_type")
    }
}

impl ActivityType {
    pub const ALL: [ActivityType; 26] = [
        ActivityType::CheckUp,
        ActivityType::Operation,
        ActivityType::Sale,
        ActivityType::Vaccination,
        ActivityType::Dental,
        ActivityType::Grooming,
        ActivityType::Emergency,
        ActivityType::Consultation,
        ActivityType::Imaging,
        ActivityType::Phone,
        ActivityType::Bath,
        ActivityType::Feces,
        ActivityType::Injury,
        ActivityType::Exercise,
        ActivityType::Food,
        ActivityType::Nails,
        ActivityType::Wash,
        ActivityType::Urine,
        ActivityType::Vomit,
        ActivityType::Deworming,
        ActivityType::Water,
        ActivityType::Sleep,
        ActivityType::Seizure,
        ActivityType::Season,
        ActivityType::Medication,
        ActivityType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::CheckUp => "check_up",
            ActivityType::Operation => "operation",
            ActivityType::Sale => "sale",
            ActivityType::Vaccination => "vaccination",
            ActivityType::Dental => "dental",
            ActivityType::Grooming => "grooming",
            ActivityType::Emergency => "emergency",
            ActivityType::Consultation => "consultation",
            ActivityType::Imaging => "imaging",
            ActivityType::Phone => "phone",
            ActivityType::Bath => "bath",
            ActivityType::Feces => "feces",
            ActivityType::Injury => "injury",
            ActivityType::Exercise => "exercise",
            ActivityType::Food => "food",
            ActivityType::Nails => "nails",
            ActivityType::Wash => "wash",
            ActivityType::Urine => "urine",
            ActivityType::Vomit => "vomit",
            ActivityType::Deworming => "deworming",
            ActivityType::Water => "water",
            ActivityType::Sleep => "sleep",
            ActivityType::Seizure => "seizure",
            ActivityType::Season => "season",
            ActivityType::Medication => "medication",
            ActivityType::Other => "other",
        }
    }

    /// Exact symbolic-name matching; unknown tags are a caller error.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ActivityLog {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub date: NaiveDateTime,
    pub activity: ActivityType,
    pub comments: Option<String>,
    pub procedures: Option<String>,
    pub medication: Option<String>,
    pub food_name: Option<String>,
    pub medication_brand: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[derive(Debug, Deserialize)]
pub struct ActivityLogRequest {
    #[serde(with = "timestamp::naive")]
    pub date: NaiveDateTime,
    pub activity: ActivityType,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub procedures: Option<String>,
    #[serde(default)]
    pub medication: Option<String>,
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub medication_brand: Option<String>,
    #[serde(default)]
    pub appointment_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ActivityLogResponse {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub date: NaiveDateTime,
    pub activity: ActivityType,
    pub comments: Option<String>,
    pub procedures: Option<String>,
    pub medication: Option<String>,
    pub food_name: Option<String>,
    pub medication_brand: Option<String>,
    pub version: i32,
}

impl From<ActivityLog> for ActivityLogResponse {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id,
            animal_id: log.animal_id,
            appointment_id: log.appointment_id,
            date: log.date,
            activity: log.activity,
            comments: log.comments,
            procedures: log.procedures,
            medication: log.medication,
            food_name: log.food_name,
            medication_brand: log.medication_brand,
            version: log.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_names_round_trip() {
        for activity in ActivityType::ALL {
            assert_eq!(ActivityType::from_str(activity.as_str()), Some(activity));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(ActivityType::from_str("juggling"), None);
        assert_eq!(ActivityType::from_str("CheckUp"), None);
        assert_eq!(ActivityType::from_str(""), None);
    }

    #[test]
    fn serde_matches_symbolic_names() {
        for activity in ActivityType::ALL {
            let json = serde_json::to_string(&activity).unwrap();
            assert_eq!(json, format!("\"{}\"", activity.as_str()));
        }
    }
}
