use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::tenant::{Tenant, TenantStatus, TenantUpdate};
use crate::database::predicate::Predicate;
use crate::database::query_builder::QueryBuilder;
use crate::database::repository::{update_returning, ChangeValue, Repository};

/// Filters for the tenant list endpoint, already clamped by the service
/// layer.
#[derive(Debug, Clone, Default)]
pub struct TenantListFilter {
    pub skip: i64,
    pub limit: i64,
    pub status: Option<TenantStatus>,
    pub search_id: Option<i32>,
    pub search: Option<String>,
    pub include_deleted: bool,
    /// Restrict to tenants mapped to this sport (joins the mapping table).
    pub sports_id: Option<i32>,
}

/// One predicate for both the page query and the count query. Columns are
/// table-qualified because the sports_id filter adds a join.
fn list_predicate(filter: &TenantListFilter) -> Predicate {
    let mut predicate = Predicate::new()
        .exclude_deleted("tenants.is_deleted", filter.include_deleted)
        .eq_opt("tenants.status", filter.status.map(|s| s.as_str()))
        .eq_opt("tenants.id", filter.search_id);

    if let Some(term) = filter.search.as_deref() {
        predicate = predicate.search(&["tenants.name", "tenants.tenant_code"], term);
    }
    if let Some(sport_id) = filter.sports_id {
        predicate = predicate.eq("tenant_sports_mapping.sport_id", sport_id);
    }
    predicate
}

fn list_query(filter: &TenantListFilter) -> QueryBuilder<Tenant> {
    let mut qb = QueryBuilder::<Tenant>::new("tenants")
        .select("\"tenants\".*")
        .predicate(list_predicate(filter))
        .order_by("\"tenants\".\"id\"");

    if filter.sports_id.is_some() {
        // The join fans out one row per mapping; DISTINCT keeps the page and
        // the count honest
        qb = qb
            .join("JOIN \"tenant_sports_mapping\" ON \"tenant_sports_mapping\".\"tenant_id\" = \"tenants\".\"id\"")
            .distinct();
    }
    qb
}

/// Returns the requested page plus the total count for the same filter set.
pub async fn list(
    pool: &PgPool,
    filter: &TenantListFilter,
) -> Result<(Vec<Tenant>, i64), DatabaseError> {
    let query = list_query(filter);
    let total_count = query.count(pool).await?;
    let items = query
        .page(filter.skip, filter.limit)
        .select_all(pool)
        .await?;
    Ok((items, total_count))
}

/// Lookup by unique code. Soft-deleted rows are still returned; the service
/// layer decides whether they count.
pub async fn find_by_code(pool: &PgPool, tenant_code: &str) -> Result<Option<Tenant>, DatabaseError> {
    Repository::<Tenant>::new()
        .get_by_field(pool, "tenant_code", tenant_code)
        .await
}

/// Lookup by unique external UUID.
pub async fn find_by_uuid(pool: &PgPool, tenant_uuid: Uuid) -> Result<Option<Tenant>, DatabaseError> {
    let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM \"tenants\" WHERE \"tenant_uuid\" = $1")
        .bind(tenant_uuid)
        .fetch_optional(pool)
        .await?;
    Ok(tenant)
}

/// True when the tenant exists and is not soft-deleted.
pub async fn validate_exists(pool: &PgPool, tenant_id: i32) -> Result<bool, DatabaseError> {
    let row: Option<(i32,)> = sqlx::query_as(
        "SELECT \"id\" FROM \"tenants\" WHERE \"id\" = $1 AND \"is_deleted\" = FALSE",
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

/// Insert a tenant with an already-normalized code and resolved UUID.
pub async fn insert(
    pool: &PgPool,
    name: &str,
    tenant_code: &str,
    tenant_uuid: Uuid,
    logo: Option<&str>,
    address: Option<&str>,
    email: Option<&str>,
    description: Option<&str>,
    status: TenantStatus,
) -> Result<Tenant, DatabaseError> {
    let tenant = sqlx::query_as::<_, Tenant>(
        "INSERT INTO \"tenants\" \
         (\"name\", \"tenant_code\", \"tenant_uuid\", \"logo\", \"address\", \"email\", \"description\", \"status\") \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING *",
    )
    .bind(name)
    .bind(tenant_code)
    .bind(tenant_uuid)
    .bind(logo)
    .bind(address)
    .bind(email)
    .bind(description)
    .bind(status.as_str())
    .fetch_one(pool)
    .await?;
    Ok(tenant)
}

/// Apply a partial update; fields left `None` stay untouched and
/// `updated_at` refreshes.
pub async fn update(
    pool: &PgPool,
    tenant_id: i32,
    changes: &TenantUpdate,
) -> Result<Option<Tenant>, DatabaseError> {
    let mut set: Vec<(&str, ChangeValue)> = vec![];
    if let Some(name) = &changes.name {
        set.push(("name", name.clone().into()));
    }
    if let Some(code) = &changes.tenant_code {
        set.push(("tenant_code", code.clone().into()));
    }
    if let Some(logo) = &changes.logo {
        set.push(("logo", logo.clone().into()));
    }
    if let Some(address) = &changes.address {
        set.push(("address", address.clone().into()));
    }
    if let Some(email) = &changes.email {
        set.push(("email", email.clone().into()));
    }
    if let Some(description) = &changes.description {
        set.push(("description", description.clone().into()));
    }
    if let Some(status) = changes.status {
        set.push(("status", status.as_str().into()));
    }

    update_returning::<Tenant>(pool, tenant_id, &set).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_defaults_to_not_deleted_only() {
        let filter = TenantListFilter {
            limit: 100,
            ..Default::default()
        };
        let sql = list_predicate(&filter).to_sql(0);
        assert_eq!(sql.clause, "\"tenants\".\"is_deleted\" = FALSE");
    }

    #[test]
    fn predicate_combines_all_filters() {
        let filter = TenantListFilter {
            skip: 0,
            limit: 100,
            status: Some(TenantStatus::Active),
            search_id: Some(9),
            search: Some("acme".to_string()),
            include_deleted: false,
            sports_id: Some(4),
        };
        let sql = list_predicate(&filter).to_sql(0);
        assert!(sql.clause.contains("\"tenants\".\"is_deleted\" = FALSE"));
        assert!(sql.clause.contains("\"tenants\".\"status\" = $1"));
        assert!(sql.clause.contains("\"tenants\".\"id\" = $2"));
        assert!(sql
            .clause
            .contains("(\"tenants\".\"name\" ILIKE $3 OR \"tenants\".\"tenant_code\" ILIKE $4)"));
        assert!(sql.clause.contains("\"tenant_sports_mapping\".\"sport_id\" = $5"));
        assert_eq!(sql.params[0], serde_json::Value::from("active"));
        assert_eq!(sql.params[2], serde_json::Value::from("%acme%"));
    }

    #[test]
    fn include_deleted_lifts_the_soft_delete_filter() {
        let filter = TenantListFilter {
            limit: 100,
            include_deleted: true,
            ..Default::default()
        };
        let sql = list_predicate(&filter).to_sql(0);
        assert_eq!(sql.clause, "");
    }
}
