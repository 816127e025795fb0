use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::sport_config::{
    ConfigStatus, SportConfig, SportConfigCreate, SportConfigUpdate,
};
use crate::database::repository::{update_returning, ChangeValue};

/// All configs for one sport, oldest first.
pub async fn list_by_sport_id(
    pool: &PgPool,
    sport_id: i32,
) -> Result<Vec<SportConfig>, DatabaseError> {
    let configs = sqlx::query_as::<_, SportConfig>(
        "SELECT * FROM \"sports_config\" WHERE \"sport_id\" = $1 ORDER BY \"id\"",
    )
    .bind(sport_id)
    .fetch_all(pool)
    .await?;
    Ok(configs)
}

async fn insert_one<'e, E>(
    executor: E,
    sport_id: i32,
    config: &SportConfigCreate,
) -> Result<SportConfig, DatabaseError>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let status = config.status.unwrap_or(ConfigStatus::Active);
    let row = sqlx::query_as::<_, SportConfig>(
        "INSERT INTO \"sports_config\" \
         (\"sport_id\", \"config_type\", \"config_data\", \"status\", \"created_by\", \"description\") \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(sport_id)
    .bind(&config.config_type)
    .bind(&config.config_data)
    .bind(status.as_str())
    .bind(config.created_by)
    .bind(&config.description)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

/// Insert a batch of configs for one sport in a single transaction; either
/// every row lands or none do.
pub async fn bulk_insert(
    pool: &PgPool,
    sport_id: i32,
    configs: &[SportConfigCreate],
) -> Result<Vec<SportConfig>, DatabaseError> {
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(configs.len());
    for config in configs {
        let row = insert_one(&mut *tx, sport_id, config).await?;
        created.push(row);
    }
    tx.commit().await?;
    Ok(created)
}

/// Apply a partial update; a JSON `null` for `config_data` means "leave it
/// alone", not "clear it".
pub async fn update(
    pool: &PgPool,
    config_id: i32,
    changes: &SportConfigUpdate,
) -> Result<Option<SportConfig>, DatabaseError> {
    let mut set: Vec<(&str, ChangeValue)> = vec![];
    if let Some(config_type) = &changes.config_type {
        set.push(("config_type", config_type.clone().into()));
    }
    if let Some(config_data) = &changes.config_data {
        // Whole-value JSONB bind; scalar destructuring would mistype it
        set.push(("config_data", ChangeValue::json(config_data.clone())));
    }
    if let Some(status) = changes.status {
        set.push(("status", status.as_str().into()));
    }
    if let Some(description) = &changes.description {
        set.push(("description", description.clone().into()));
    }

    update_returning::<SportConfig>(pool, config_id, &set).await
}
