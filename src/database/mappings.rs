use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::mapping::{
    MappingCreate, MappingStatus, MappingUpdate, TenantSportsMapping,
};
use crate::database::predicate::Predicate;
use crate::database::repository::{update_returning, ChangeValue};

/// The mapping row for one (tenant, sport) pair, if registered.
pub async fn find_by_tenant_and_sport(
    pool: &PgPool,
    tenant_id: i32,
    sport_id: i32,
) -> Result<Option<TenantSportsMapping>, DatabaseError> {
    let mapping = sqlx::query_as::<_, TenantSportsMapping>(
        "SELECT * FROM \"tenant_sports_mapping\" WHERE \"tenant_id\" = $1 AND \"sport_id\" = $2",
    )
    .bind(tenant_id)
    .bind(sport_id)
    .fetch_optional(pool)
    .await?;
    Ok(mapping)
}

/// All mappings for a tenant, optionally narrowed by status.
pub async fn list_by_tenant(
    pool: &PgPool,
    tenant_id: i32,
    status: Option<MappingStatus>,
) -> Result<Vec<TenantSportsMapping>, DatabaseError> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, TenantSportsMapping>(
                "SELECT * FROM \"tenant_sports_mapping\" \
                 WHERE \"tenant_id\" = $1 AND \"status\" = $2 ORDER BY \"id\"",
            )
            .bind(tenant_id)
            .bind(status.as_str())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, TenantSportsMapping>(
                "SELECT * FROM \"tenant_sports_mapping\" WHERE \"tenant_id\" = $1 ORDER BY \"id\"",
            )
            .bind(tenant_id)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

/// How many of the given sports are already registered for the tenant.
pub async fn count_existing(
    pool: &PgPool,
    tenant_id: i32,
    sport_ids: &[i32],
) -> Result<i64, DatabaseError> {
    if sport_ids.is_empty() {
        return Ok(0);
    }

    let ids: Vec<i64> = sport_ids.iter().map(|id| *id as i64).collect();
    let sql_parts = Predicate::new()
        .eq("tenant_id", tenant_id)
        .in_ids("sport_id", &ids)
        .to_sql(0);
    let sql = format!(
        "SELECT COUNT(*) AS \"count\" FROM \"tenant_sports_mapping\" WHERE {}",
        sql_parts.clause
    );

    let mut q = sqlx::query_as::<_, (i64,)>(&sql);
    q = q.bind(tenant_id);
    for id in sport_ids {
        q = q.bind(id);
    }
    let (count,) = q.fetch_one(pool).await?;
    Ok(count)
}

/// Insert a batch of mappings in one transaction. The unique constraint on
/// (tenant_id, sport_id) aborts the whole batch when any pair already exists.
pub async fn bulk_insert(
    pool: &PgPool,
    rows: &[MappingCreate],
) -> Result<Vec<TenantSportsMapping>, DatabaseError> {
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(rows.len());
    for row in rows {
        let mapping = sqlx::query_as::<_, TenantSportsMapping>(
            "INSERT INTO \"tenant_sports_mapping\" \
             (\"tenant_id\", \"sport_id\", \"status\", \"created_by\", \"description\") \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(row.tenant_id)
        .bind(row.sport_id)
        .bind(row.status.as_str())
        .bind(row.created_by)
        .bind(&row.description)
        .fetch_one(&mut *tx)
        .await?;
        created.push(mapping);
    }
    tx.commit().await?;
    Ok(created)
}

/// Apply a partial update to a mapping already located by its pair.
pub async fn update(
    pool: &PgPool,
    mapping_id: i32,
    changes: &MappingUpdate,
) -> Result<Option<TenantSportsMapping>, DatabaseError> {
    let mut set: Vec<(&str, ChangeValue)> = vec![];
    if let Some(status) = changes.status {
        set.push(("status", status.as_str().into()));
    }
    if let Some(description) = &changes.description {
        set.push(("description", description.clone().into()));
    }
    if let Some(updated_by) = changes.updated_by {
        set.push(("updated_by", updated_by.into()));
    }

    update_returning::<TenantSportsMapping>(pool, mapping_id, &set).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_predicate_covers_pair_membership() {
        let sql = Predicate::new()
            .eq("tenant_id", 3)
            .in_ids("sport_id", &[10, 11])
            .to_sql(0);
        assert_eq!(
            sql.clause,
            "\"tenant_id\" = $1 AND \"sport_id\" IN ($2, $3)"
        );
    }
}
