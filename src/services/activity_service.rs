use anyhow::Result;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{ActivityLog, ActivityLogRequest, ActivityType};
use crate::services::mutator::RecordPatch;

#[derive(Clone)]
pub struct ActivityService {
    db: PgPool,
}

impl ActivityService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn add(&self, animal_id: Uuid, request: ActivityLogRequest) -> Result<ActivityLog> {
        let log = sqlx::query_as::<_, ActivityLog>(
            "INSERT INTO activity_logs
                 (id, animal_id, date, activity, comments, procedures, medication,
                  food_name, medication_brand, appointment_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(animal_id)
        .bind(request.date)
        .bind(request.activity)
        .bind(&request.comments)
        .bind(&request.procedures)
        .bind(&request.medication)
        .bind(&request.food_name)
        .bind(&request.medication_brand)
        .bind(request.appointment_id)
        .fetch_one(&self.db)
        .await?;

        Ok(log)
    }

    /// Replace a log entry. PUT semantics: every field is written, absent
    /// optionals become NULL. Scoped to the animal.
    pub async fn replace(
        &self,
        animal_id: Uuid,
        log_id: Uuid,
        request: ActivityLogRequest,
    ) -> Result<Option<ActivityLog>> {
        let mut patch = RecordPatch::new("activity_logs");
        patch.set("date", request.date);
        patch.set("activity", request.activity);
        patch.set("comments", request.comments);
        patch.set("procedures", request.procedures);
        patch.set("medication", request.medication);
        patch.set("food_name", request.food_name);
        patch.set("medication_brand", request.medication_brand);
        patch.set("appointment_id", request.appointment_id);

        let log = patch
            .build_scoped(log_id, "animal_id", animal_id, "*")
            .build_query_as::<ActivityLog>()
            .fetch_optional(&self.db)
            .await?;

        Ok(log)
    }

    pub async fn delete(&self, animal_id: Uuid, log_id: Uuid) -> Result<Option<ActivityLog>> {
        let log = sqlx::query_as::<_, ActivityLog>(
            "DELETE FROM activity_logs WHERE id = $1 AND animal_id = $2 RETURNING *",
        )
        .bind(log_id)
        .bind(animal_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(log)
    }

    /// Time- and type-filtered logs, oldest first. Both predicates are
    /// pushed into the query.
    pub async fn list(
        &self,
        animal_id: Uuid,
        cutoff: Option<NaiveDateTime>,
        types: Option<Vec<ActivityType>>,
    ) -> Result<Vec<ActivityLog>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM activity_logs WHERE animal_id = ");
        builder.push_bind(animal_id);

        if let Some(cutoff) = cutoff {
            builder.push(" AND date >= ");
            builder.push_bind(cutoff);
        }

        if let Some(types) = types {
            builder.push(" AND activity = ANY(");
            builder.push_bind(types);
            builder.push(")");
        }

        builder.push(" ORDER BY date");

        let logs = builder
            .build_query_as::<ActivityLog>()
            .fetch_all(&self.db)
            .await?;

        Ok(logs)
    }
}
