//! Generic partial-update builder shared by every update path.
//!
//! Each successful mutation increments the row's `version` counter exactly
//! once and refreshes `updated_at`, whether or not any caller field changed.
//! The counter is advisory: it is never compared against a caller-supplied
//! expected value before the write. The whole patch is a single UPDATE
//! statement, so it commits or fails as one atomic unit.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

pub struct RecordPatch<'args> {
    builder: QueryBuilder<'args, Postgres>,
    fields: usize,
}

impl<'args> RecordPatch<'args> {
    /// Start a patch against `table`. Field names are a caller contract;
    /// they are interpolated into SQL and must never come from user input.
    pub fn new(table: &str) -> Self {
        let mut builder = QueryBuilder::new("UPDATE ");
        builder.push(table);
        builder.push(" SET version = version + 1, updated_at = now()");
        Self { builder, fields: 0 }
    }

    /// Assign `value` to `column`.
    pub fn set<T>(&mut self, column: &str, value: T) -> &mut Self
    where
        T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + Send,
    {
        self.builder.push(", ");
        self.builder.push(column);
        self.builder.push(" = ");
        self.builder.push_bind(value);
        self.fields += 1;
        self
    }

    /// Assign only when the field was explicitly present in the request.
    pub fn set_present<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    /// Number of caller fields assigned so far.
    pub fn field_count(&self) -> usize {
        self.fields
    }

    /// Finish the statement for the row with primary key `id`.
    pub fn build(mut self, id: Uuid, returning: &str) -> QueryBuilder<'args, Postgres> {
        self.builder.push(" WHERE id = ");
        self.builder.push_bind(id);
        self.builder.push(" RETURNING ");
        self.builder.push(returning);
        self.builder
    }

    /// Finish the statement for a child row, additionally guarded by its
    /// parent key. A cross-parent id mismatch matches no rows.
    pub fn build_scoped(
        mut self,
        id: Uuid,
        parent_column: &str,
        parent_id: Uuid,
        returning: &str,
    ) -> QueryBuilder<'args, Postgres> {
        self.builder.push(" WHERE id = ");
        self.builder.push_bind(id);
        self.builder.push(" AND ");
        self.builder.push(parent_column);
        self.builder.push(" = ");
        self.builder.push_bind(parent_id);
        self.builder.push(" RETURNING ");
        self.builder.push(returning);
        self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_patch_still_bumps_version() {
        let patch = RecordPatch::new("animals");
        assert_eq!(patch.field_count(), 0);

        let sql = patch.build(Uuid::new_v4(), "*").into_sql();
        assert_eq!(
            sql,
            "UPDATE animals SET version = version + 1, updated_at = now() \
             WHERE id = $1 RETURNING *"
        );
    }

    #[test]
    fn present_fields_are_appended_in_order() {
        let mut patch = RecordPatch::new("users");
        patch.set_present("first_name", Some("Ada"));
        patch.set_present::<&str>("last_name", None);
        patch.set("city", "London");
        assert_eq!(patch.field_count(), 2);

        let sql = patch.build(Uuid::new_v4(), "*").into_sql();
        assert_eq!(
            sql,
            "UPDATE users SET version = version + 1, updated_at = now(), \
             first_name = $1, city = $2 WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn scoped_patch_guards_parent_key() {
        let mut patch = RecordPatch::new("weight_history");
        patch.set("weight", 12.5f64);

        let sql = patch
            .build_scoped(Uuid::new_v4(), "animal_id", Uuid::new_v4(), "*")
            .into_sql();
        assert_eq!(
            sql,
            "UPDATE weight_history SET version = version + 1, updated_at = now(), \
             weight = $1 WHERE id = $2 AND animal_id = $3 RETURNING *"
        );
    }
}
