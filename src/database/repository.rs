use serde_json::Value;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::predicate::Predicate;
use crate::database::query_builder::{bind_param_query_as, QueryBuilder};

/// Metadata a row type must declare to be served by the generic repository.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Table backing this entity.
    const TABLE: &'static str;
    /// Display name used in error messages.
    const NAME: &'static str;
    /// Known column names; list filters silently drop anything else, while
    /// `get_by_field` treats an unknown name as a contract violation.
    const FIELDS: &'static [&'static str];
}

/// Marker for entities carrying an `is_deleted` flag. `soft_delete` is only
/// callable for types implementing this, so invoking it on an entity without
/// the flag is a compile error instead of a runtime one.
pub trait SoftDelete: Entity {}

/// Generic data-access primitives shared by every entity.
///
/// Absence is never an error here: lookups return `None`/`false` and leave
/// the not-found decision to the service layer.
pub struct Repository<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> {
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    /// Fetch a single row by id. Does not filter on soft-delete; callers
    /// decide how to treat deleted rows.
    pub async fn get(&self, pool: &PgPool, id: i32) -> Result<Option<T>, DatabaseError> {
        QueryBuilder::<T>::new(T::TABLE)
            .predicate(Predicate::new().eq("id", id))
            .select_optional(pool)
            .await
    }

    /// List rows matching an equality-filter map, ordered by primary key.
    /// Unknown filter keys are ignored rather than rejected.
    pub async fn list(
        &self,
        pool: &PgPool,
        skip: i64,
        limit: i64,
        filters: &[(&str, Value)],
    ) -> Result<Vec<T>, DatabaseError> {
        QueryBuilder::<T>::new(T::TABLE)
            .predicate(Self::filter_predicate(filters))
            .order_by("\"id\"")
            .page(skip, limit)
            .select_all(pool)
            .await
    }

    /// Equality predicate from a filter map, dropping keys the entity does
    /// not declare.
    fn filter_predicate(filters: &[(&str, Value)]) -> Predicate {
        let mut predicate = Predicate::new();
        for (field, value) in filters {
            if T::FIELDS.contains(field) {
                predicate = predicate.eq(field, value.clone());
            }
        }
        predicate
    }

    /// Single-field equality lookup. Unknown fields are a programming error,
    /// not a user error.
    pub async fn get_by_field(
        &self,
        pool: &PgPool,
        field_name: &str,
        field_value: impl Into<Value>,
    ) -> Result<Option<T>, DatabaseError> {
        if !T::FIELDS.contains(&field_name) {
            return Err(DatabaseError::UnknownField {
                entity: T::NAME,
                field: field_name.to_string(),
            });
        }

        QueryBuilder::<T>::new(T::TABLE)
            .predicate(Predicate::new().eq(field_name, field_value))
            .select_optional(pool)
            .await
    }

    /// Existence check by id, ignoring soft-delete state.
    pub async fn exists(&self, pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
        let found = self.get(pool, id).await?;
        Ok(found.is_some())
    }

    /// Physically remove a row, returning its prior state.
    pub async fn delete(&self, pool: &PgPool, id: i32) -> Result<Option<T>, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = $1 RETURNING *", T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }
}

impl<T: SoftDelete> Repository<T> {
    /// Flag a row deleted without removing it.
    pub async fn soft_delete(&self, pool: &PgPool, id: i32) -> Result<Option<T>, DatabaseError> {
        let sql = format!(
            "UPDATE \"{}\" SET \"is_deleted\" = TRUE, \"updated_at\" = now() \
             WHERE \"id\" = $1 RETURNING *",
            T::TABLE
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }
}

/// A column value in a partial update. `Json` binds the whole value as
/// JSONB; `Scalar` destructures to the matching Postgres scalar type, which
/// would mistype JSON strings and numbers against a jsonb column.
#[derive(Debug, Clone)]
pub enum ChangeValue {
    Scalar(Value),
    Json(Value),
}

impl ChangeValue {
    pub fn json(value: Value) -> Self {
        ChangeValue::Json(value)
    }
}

impl From<String> for ChangeValue {
    fn from(v: String) -> Self {
        ChangeValue::Scalar(Value::from(v))
    }
}

impl From<&str> for ChangeValue {
    fn from(v: &str) -> Self {
        ChangeValue::Scalar(Value::from(v))
    }
}

impl From<i32> for ChangeValue {
    fn from(v: i32) -> Self {
        ChangeValue::Scalar(Value::from(v))
    }
}

impl From<bool> for ChangeValue {
    fn from(v: bool) -> Self {
        ChangeValue::Scalar(Value::from(v))
    }
}

fn update_sql(table: &str, changes: &[(&str, ChangeValue)]) -> String {
    let mut assignments: Vec<String> = vec![];
    for (i, (column, _)) in changes.iter().enumerate() {
        assignments.push(format!("\"{}\" = ${}", column, i + 1));
    }
    assignments.push("\"updated_at\" = now()".to_string());

    format!(
        "UPDATE \"{}\" SET {} WHERE \"id\" = ${} RETURNING *",
        table,
        assignments.join(", "),
        changes.len() + 1
    )
}

/// Partial-update helper: applies only the provided column/value pairs and
/// refreshes `updated_at`. Returns the updated row, or `None` when the id is
/// missing.
pub async fn update_returning<T: Entity>(
    pool: &PgPool,
    id: i32,
    changes: &[(&str, ChangeValue)],
) -> Result<Option<T>, DatabaseError> {
    let sql = update_sql(T::TABLE, changes);

    let mut q = sqlx::query_as::<_, T>(&sql);
    for (_, value) in changes.iter() {
        q = match value {
            ChangeValue::Scalar(v) => bind_param_query_as(q, v),
            ChangeValue::Json(v) => q.bind(v.clone()),
        };
    }
    q = q.bind(id);
    let row = q.fetch_optional(pool).await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::tenant::Tenant;
    use sqlx::postgres::PgPoolOptions;

    #[test]
    fn update_sql_places_every_change_and_refreshes_updated_at() {
        let changes: Vec<(&str, ChangeValue)> = vec![
            ("name", "Acme".into()),
            ("status", "inactive".into()),
        ];
        let sql = update_sql("tenants", &changes);
        assert_eq!(
            sql,
            "UPDATE \"tenants\" SET \"name\" = $1, \"status\" = $2, \
             \"updated_at\" = now() WHERE \"id\" = $3 RETURNING *"
        );
    }

    #[test]
    fn json_change_values_stay_tagged() {
        let value = serde_json::json!("a plain json string");
        assert!(matches!(ChangeValue::json(value), ChangeValue::Json(_)));
        let scalar: ChangeValue = "a text column value".into();
        assert!(matches!(scalar, ChangeValue::Scalar(_)));
    }

    #[test]
    fn unknown_list_filter_keys_are_ignored() {
        let filters: Vec<(&str, Value)> = vec![
            ("name", Value::from("Acme")),
            ("bogus", Value::from("x")),
        ];
        let predicate = Repository::<Tenant>::filter_predicate(&filters);
        let sql = predicate.to_sql(0);
        assert_eq!(sql.clause, "\"name\" = $1");
        assert_eq!(sql.params, vec![Value::from("Acme")]);
    }

    #[tokio::test]
    async fn get_by_field_rejects_unknown_field_before_querying() {
        // Lazy pool never connects; the rejection fires first
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let repo = Repository::<Tenant>::new();
        let err = repo.get_by_field(&pool, "bogus", "x").await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::UnknownField { entity: "Tenant", .. }
        ));
    }
}
