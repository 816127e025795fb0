use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::sport::{Sport, SportCategory, SportStatus, SportUpdate};
use crate::database::predicate::Predicate;
use crate::database::query_builder::QueryBuilder;
use crate::database::repository::{update_returning, ChangeValue, Repository};

/// Filters for the sports list endpoint.
#[derive(Debug, Clone, Default)]
pub struct SportListFilter {
    pub skip: i64,
    pub limit: i64,
    pub status: Option<SportStatus>,
    pub category: Option<SportCategory>,
    pub search_id: Option<i32>,
    pub search: Option<String>,
    pub include_deleted: bool,
}

fn list_predicate(filter: &SportListFilter) -> Predicate {
    let mut predicate = Predicate::new()
        .exclude_deleted("is_deleted", filter.include_deleted)
        .eq_opt("status", filter.status.map(|s| s.as_str()))
        .eq_opt("category", filter.category.map(|c| c.as_str()))
        .eq_opt("id", filter.search_id);

    if let Some(term) = filter.search.as_deref() {
        predicate = predicate.search(&["sport_name", "sport_code"], term);
    }
    predicate
}

/// Returns the requested page plus the total count for the same filter set.
pub async fn list(
    pool: &PgPool,
    filter: &SportListFilter,
) -> Result<(Vec<Sport>, i64), DatabaseError> {
    let query = QueryBuilder::<Sport>::new("sports")
        .predicate(list_predicate(filter))
        .order_by("\"id\"");
    let total_count = query.count(pool).await?;
    let items = query
        .page(filter.skip, filter.limit)
        .select_all(pool)
        .await?;
    Ok((items, total_count))
}

/// Lookup by unique code, including soft-deleted rows.
pub async fn find_by_code(pool: &PgPool, sport_code: &str) -> Result<Option<Sport>, DatabaseError> {
    Repository::<Sport>::new()
        .get_by_field(pool, "sport_code", sport_code)
        .await
}

/// Batched existence check: partitions the requested ids into those backed by
/// a live (not soft-deleted) sport and those that are missing. Input order is
/// not preserved; duplicates collapse.
pub async fn validate_sports_exist(
    pool: &PgPool,
    sport_ids: &[i32],
) -> Result<(Vec<i32>, Vec<i32>), DatabaseError> {
    if sport_ids.is_empty() {
        return Ok((vec![], vec![]));
    }

    let ids: Vec<i64> = sport_ids.iter().map(|id| *id as i64).collect();
    let sql_parts = Predicate::new()
        .in_ids("id", &ids)
        .exclude_deleted("is_deleted", false)
        .to_sql(0);
    let sql = format!("SELECT \"id\" FROM \"sports\" WHERE {}", sql_parts.clause);

    let mut q = sqlx::query_as::<_, (i32,)>(&sql);
    for id in sport_ids {
        q = q.bind(id);
    }
    let rows = q.fetch_all(pool).await?;

    let found: Vec<i32> = rows.into_iter().map(|(id,)| id).collect();
    let missing: Vec<i32> = sport_ids
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect();
    Ok((found, missing))
}

/// Insert a sport with an already-normalized code.
pub async fn insert(
    pool: &PgPool,
    sport_code: &str,
    sport_name: &str,
    category: Option<SportCategory>,
    icon_url: Option<&str>,
    status: SportStatus,
    description: Option<&str>,
) -> Result<Sport, DatabaseError> {
    let sport = sqlx::query_as::<_, Sport>(
        "INSERT INTO \"sports\" \
         (\"sport_code\", \"sport_name\", \"category\", \"icon_url\", \"status\", \"description\") \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(sport_code)
    .bind(sport_name)
    .bind(category.map(|c| c.as_str()))
    .bind(icon_url)
    .bind(status.as_str())
    .bind(description)
    .fetch_one(pool)
    .await?;
    Ok(sport)
}

/// Apply a partial update; fields left `None` stay untouched.
pub async fn update(
    pool: &PgPool,
    sport_id: i32,
    changes: &SportUpdate,
) -> Result<Option<Sport>, DatabaseError> {
    let mut set: Vec<(&str, ChangeValue)> = vec![];
    if let Some(code) = &changes.sport_code {
        set.push(("sport_code", code.clone().into()));
    }
    if let Some(name) = &changes.sport_name {
        set.push(("sport_name", name.clone().into()));
    }
    if let Some(category) = changes.category {
        set.push(("category", category.as_str().into()));
    }
    if let Some(icon_url) = &changes.icon_url {
        set.push(("icon_url", icon_url.clone().into()));
    }
    if let Some(status) = changes.status {
        set.push(("status", status.as_str().into()));
    }
    if let Some(description) = &changes.description {
        set.push(("description", description.clone().into()));
    }

    update_returning::<Sport>(pool, sport_id, &set).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_filters_by_status_and_category() {
        let filter = SportListFilter {
            limit: 100,
            status: Some(SportStatus::Active),
            category: Some(SportCategory::RacketSports),
            ..Default::default()
        };
        let sql = list_predicate(&filter).to_sql(0);
        assert_eq!(
            sql.clause,
            "\"is_deleted\" = FALSE AND \"status\" = $1 AND \"category\" = $2"
        );
        assert_eq!(sql.params[1], serde_json::Value::from("racket_sports"));
    }

    #[test]
    fn search_matches_name_and_code() {
        let filter = SportListFilter {
            limit: 100,
            search: Some("ten".to_string()),
            ..Default::default()
        };
        let sql = list_predicate(&filter).to_sql(0);
        assert!(sql
            .clause
            .contains("(\"sport_name\" ILIKE $1 OR \"sport_code\" ILIKE $2)"));
        assert_eq!(sql.params[0], serde_json::Value::from("%ten%"));
    }
}
