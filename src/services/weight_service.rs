use anyhow::Result;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{WeightEntryRequest, WeightHistory};
use crate::services::mutator::RecordPatch;

#[derive(Clone)]
pub struct WeightService {
    db: PgPool,
}

impl WeightService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn add(&self, animal_id: Uuid, request: WeightEntryRequest) -> Result<WeightHistory> {
        let entry = sqlx::query_as::<_, WeightHistory>(
            "INSERT INTO weight_history (id, animal_id, weight, change_date)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(animal_id)
        .bind(request.weight)
        .bind(request.change_date)
        .fetch_one(&self.db)
        .await?;

        Ok(entry)
    }

    /// Replace an entry. The statement is scoped to the animal, so an entry
    /// id belonging to a different animal matches nothing.
    pub async fn replace(
        &self,
        animal_id: Uuid,
        entry_id: Uuid,
        request: WeightEntryRequest,
    ) -> Result<Option<WeightHistory>> {
        let mut patch = RecordPatch::new("weight_history");
        patch.set("weight", request.weight);
        patch.set("change_date", request.change_date);

        let entry = patch
            .build_scoped(entry_id, "animal_id", animal_id, "*")
            .build_query_as::<WeightHistory>()
            .fetch_optional(&self.db)
            .await?;

        Ok(entry)
    }

    /// Hard-delete an entry, returning it when it belonged to the animal.
    pub async fn delete(&self, animal_id: Uuid, entry_id: Uuid) -> Result<Option<WeightHistory>> {
        let entry = sqlx::query_as::<_, WeightHistory>(
            "DELETE FROM weight_history WHERE id = $1 AND animal_id = $2 RETURNING *",
        )
        .bind(entry_id)
        .bind(animal_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(entry)
    }

    /// Time-filtered history, oldest first. The cutoff predicate is pushed
    /// into the query; `None` means unbounded.
    pub async fn history(
        &self,
        animal_id: Uuid,
        cutoff: Option<NaiveDateTime>,
    ) -> Result<Vec<WeightHistory>> {
        let entries = match cutoff {
            Some(cutoff) => {
                sqlx::query_as::<_, WeightHistory>(
                    "SELECT * FROM weight_history
                     WHERE animal_id = $1 AND change_date >= $2
                     ORDER BY change_date",
                )
                .bind(animal_id)
                .bind(cutoff)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, WeightHistory>(
                    "SELECT * FROM weight_history
                     WHERE animal_id = $1
                     ORDER BY change_date",
                )
                .bind(animal_id)
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(entries)
    }
}
