//! Clinic and scheduling entities. Defined in the schema and model layer;
//! no endpoints exercise them yet.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::types::PgInterval;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::AnimalType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "specialisation_type", rename_all = "snake_case")]
pub enum SpecialisationType {
    CanineMedicine,
    FelineMedicine,
    EquineMedicine,
    AvianMedicine,
    ExoticAnimalMedicine,
    DentalSpecialist,
    OrthopedicSurgeon,
    Ophthalmologist,
    Dermatologist,
    BehavioralSpecialist,
    Radiology,
    Nutritionist,
    EmergencyAndCriticalCare,
    InternalMedicine,
    Surgery,
    Anesthesiology,
    Pathology,
    RehabilitationTherapist,
    PublicHealth,
    ZoologicalMedicine,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "staff_role", rename_all = "snake_case")]
pub enum StaffRole {
    Veterinarian,
    VeterinaryTechnician,
    Receptionist,
    Groomer,
    AnimalCareAssistant,
    LaboratoryTechnician,
    AdministrativeStaff,
    EmergencyResponseTeam,
    Specialist,
    Intern,
    Other,
}

#[derive(Debug, Clone, FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub bsp: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub specialisation: Option<SpecialisationType>,
    pub animal_type: AnimalType,
    pub organization_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct Staff {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile_number: Option<String>,
    pub hashed_password: String,
    pub description: Option<String>,
    pub specialisation: Option<SpecialisationType>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct ClinicStaff {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub clinic_id: Uuid,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct Schedule {
    pub id: Uuid,
    pub date: NaiveDate,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub clinic_staff_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub appointment_time: NaiveDateTime,
    pub activity_duration: PgInterval,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub version: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clinic_enums_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&SpecialisationType::EmergencyAndCriticalCare).unwrap(),
            "\"emergency_and_critical_care\""
        );
        assert_eq!(
            serde_json::to_string(&StaffRole::VeterinaryTechnician).unwrap(),
            "\"veterinary_technician\""
        );
    }
}
