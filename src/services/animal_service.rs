use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Animal, CreateAnimalRequest, UpdateAnimalRequest, User};
use crate::services::mutator::RecordPatch;

#[derive(Clone)]
pub struct AnimalService {
    db: PgPool,
}

impl AnimalService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an animal owned by `owner_id`. The insert and the ownership
    /// association commit in one transaction.
    pub async fn create(&self, owner_id: Uuid, request: CreateAnimalRequest) -> Result<Animal> {
        let mut tx = self.db.begin().await?;

        let animal = sqlx::query_as::<_, Animal>(
            "INSERT INTO animals
                 (id, name, animal_type, date_of_birth, identifier, sex, height,
                  color, description, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(request.animal_type)
        .bind(request.date_of_birth)
        .bind(&request.identifier)
        .bind(&request.sex)
        .bind(request.height)
        .bind(&request.color)
        .bind(&request.description)
        .bind(&request.image)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO animal_owners (animal_id, user_id) VALUES ($1, $2)")
            .bind(animal.id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(animal)
    }

    /// Ownership-scoped lookup. Yields `None` both when the animal does not
    /// exist and when it is not owned by the caller, so the two cases are
    /// indistinguishable to the client. Re-executed per request.
    pub async fn find_owned(&self, user_id: Uuid, animal_id: Uuid) -> Result<Option<Animal>> {
        let animal = sqlx::query_as::<_, Animal>(
            "SELECT a.* FROM animals a
             JOIN animal_owners ao ON ao.animal_id = a.id
             WHERE a.id = $1 AND ao.user_id = $2 AND NOT a.is_deleted",
        )
        .bind(animal_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(animal)
    }

    pub async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<Animal>> {
        let animals = sqlx::query_as::<_, Animal>(
            "SELECT a.* FROM animals a
             JOIN animal_owners ao ON ao.animal_id = a.id
             WHERE ao.user_id = $1 AND NOT a.is_deleted
             ORDER BY a.created_at",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(animals)
    }

    pub async fn owners(&self, animal_id: Uuid) -> Result<Vec<User>> {
        let owners = sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u
             JOIN animal_owners ao ON ao.user_id = u.id
             WHERE ao.animal_id = $1 AND NOT u.is_deleted
             ORDER BY ao.created_at",
        )
        .bind(animal_id)
        .fetch_all(&self.db)
        .await?;

        Ok(owners)
    }

    /// Apply a partial update, bumping the version counter once.
    pub async fn update(&self, animal_id: Uuid, request: UpdateAnimalRequest) -> Result<Animal> {
        let mut patch = RecordPatch::new("animals");
        patch.set_present("identifier", request.identifier);
        patch.set_present("name", request.name);
        patch.set_present("sex", request.sex);
        patch.set_present("height", request.height);
        patch.set_present("animal_type", request.animal_type);
        patch.set_present("color", request.color);
        patch.set_present("description", request.description);
        patch.set_present("image", request.image);
        patch.set_present("date_of_birth", request.date_of_birth);
        patch.set_present("date_of_death", request.date_of_death);
        patch.set_present("active", request.active);
        patch.set_present("road", request.road);
        patch.set_present("city", request.city);
        patch.set_present("state", request.state);
        patch.set_present("zip", request.zip);
        patch.set_present("country", request.country);
        patch.set_present("phone_number", request.phone_number);

        let animal = patch
            .build(animal_id, "*")
            .build_query_as::<Animal>()
            .fetch_one(&self.db)
            .await?;

        Ok(animal)
    }

    /// Soft-delete; the row stays for audit but vanishes from every read query.
    pub async fn delete(&self, animal_id: Uuid) -> Result<Animal> {
        let mut patch = RecordPatch::new("animals");
        patch.set("is_deleted", true);

        let animal = patch
            .build(animal_id, "*")
            .build_query_as::<Animal>()
            .fetch_one(&self.db)
            .await?;

        Ok(animal)
    }
}
