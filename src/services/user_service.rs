use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::models::{UpdateUserRequest, User};
use crate::services::mutator::RecordPatch;

#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        let hashed_password = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, hashed_password)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(&hashed_password)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND NOT is_deleted",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND NOT is_deleted",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// Apply a partial profile update, bumping the version counter once.
    pub async fn update(&self, user_id: Uuid, request: UpdateUserRequest) -> Result<User> {
        let mut patch = RecordPatch::new("users");
        patch.set_present("first_name", request.first_name);
        patch.set_present("last_name", request.last_name);
        patch.set_present("mobile_number", request.mobile_number);
        patch.set_present("road", request.road);
        patch.set_present("city", request.city);
        patch.set_present("state", request.state);
        patch.set_present("zip", request.zip);
        patch.set_present("country", request.country);
        patch.set_present("phone_number", request.phone_number);

        let user = patch
            .build(user_id, "*")
            .build_query_as::<User>()
            .fetch_one(&self.db)
            .await?;

        Ok(user)
    }

    pub async fn reset_password(&self, user_id: Uuid, password: &str) -> Result<User> {
        let hashed_password = hash_password(password)?;

        let mut patch = RecordPatch::new("users");
        patch.set("hashed_password", hashed_password);

        let user = patch
            .build(user_id, "*")
            .build_query_as::<User>()
            .fetch_one(&self.db)
            .await?;

        Ok(user)
    }

    /// Soft-delete the account. Every read query filters on `is_deleted`.
    pub async fn delete(&self, user_id: Uuid) -> Result<()> {
        let mut patch = RecordPatch::new("users");
        patch.set("is_deleted", true);

        patch
            .build(user_id, "id")
            .build_query_scalar::<Uuid>()
            .fetch_optional(&self.db)
            .await?;

        Ok(())
    }
}
