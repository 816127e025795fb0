use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::mapping::{
    MappingCreate, MappingStatus, MappingUpdate, TenantSportsMapping,
};
use crate::database::{mappings, sports, tenants};
use crate::error::ApiError;

/// Actor id recorded when the caller does not supply one.
const DEFAULT_CREATED_BY: i32 = 1;

/// One sport in a bulk registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSportItem {
    pub sport_id: i32,
    pub description: Option<String>,
}

/// Register several sports for a tenant in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRegisterRequest {
    pub sports: Vec<RegisterSportItem>,
    pub created_by: Option<i32>,
}

/// Unknown or soft-deleted sports fail the whole request as NotFound, the
/// same way a single-sport lookup would.
fn missing_sports_error(missing: &[i32]) -> ApiError {
    let listed = missing
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    ApiError::not_found(format!("Sports not found or deleted: {}", listed))
}

/// Drop repeated sport ids, keeping the first occurrence of each.
fn dedupe_sports(items: Vec<RegisterSportItem>) -> Vec<RegisterSportItem> {
    let mut seen: Vec<i32> = vec![];
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item.sport_id) {
            seen.push(item.sport_id);
            unique.push(item);
        }
    }
    unique
}

pub struct MappingService {
    pool: PgPool,
}

impl MappingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a batch of sports for a tenant. All-or-nothing: the request
    /// is rejected outright when any sport is unknown or any pair is already
    /// registered, and the surviving batch inserts in one transaction.
    pub async fn bulk_register(
        &self,
        tenant_id: i32,
        request: BulkRegisterRequest,
    ) -> Result<Vec<TenantSportsMapping>, ApiError> {
        if request.sports.is_empty() {
            return Err(ApiError::bad_request("At least one sport is required"));
        }
        let items = dedupe_sports(request.sports);

        if !tenants::validate_exists(&self.pool, tenant_id).await? {
            return Err(ApiError::not_found(format!(
                "Tenant with ID {} not found",
                tenant_id
            )));
        }

        let sport_ids: Vec<i32> = items.iter().map(|item| item.sport_id).collect();
        let (_, missing) = sports::validate_sports_exist(&self.pool, &sport_ids).await?;
        if !missing.is_empty() {
            return Err(missing_sports_error(&missing));
        }

        let existing = mappings::count_existing(&self.pool, tenant_id, &sport_ids).await?;
        if existing > 0 {
            return Err(ApiError::conflict(format!(
                "{} of the requested sports are already registered for tenant {}",
                existing, tenant_id
            )));
        }

        let created_by = request.created_by.unwrap_or(DEFAULT_CREATED_BY);
        let rows: Vec<MappingCreate> = items
            .into_iter()
            .map(|item| MappingCreate {
                tenant_id,
                sport_id: item.sport_id,
                status: MappingStatus::Active,
                created_by: Some(created_by),
                description: item.description,
            })
            .collect();

        let created = mappings::bulk_insert(&self.pool, &rows).await?;
        tracing::info!(tenant_id, count = created.len(), "sports registered for tenant");
        Ok(created)
    }

    /// All mappings for a tenant, optionally narrowed by status.
    pub async fn list_for_tenant(
        &self,
        tenant_id: i32,
        status: Option<MappingStatus>,
    ) -> Result<Vec<TenantSportsMapping>, ApiError> {
        if !tenants::validate_exists(&self.pool, tenant_id).await? {
            return Err(ApiError::not_found(format!(
                "Tenant with ID {} not found",
                tenant_id
            )));
        }
        let rows = mappings::list_by_tenant(&self.pool, tenant_id, status).await?;
        Ok(rows)
    }

    /// Update the mapping addressed by its (tenant, sport) pair.
    pub async fn update_by_tenant_sport(
        &self,
        tenant_id: i32,
        sport_id: i32,
        payload: MappingUpdate,
    ) -> Result<TenantSportsMapping, ApiError> {
        let mapping = mappings::find_by_tenant_and_sport(&self.pool, tenant_id, sport_id)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(format!(
                    "No mapping found for tenant {} and sport {}",
                    tenant_id, sport_id
                ))
            })?;

        let updated = mappings::update(&self.pool, mapping.id, &payload).await?;
        updated.ok_or_else(|| {
            ApiError::not_found(format!(
                "No mapping found for tenant {} and sport {}",
                tenant_id, sport_id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_sport_ids_collapse_keeping_first() {
        let items = vec![
            RegisterSportItem { sport_id: 1, description: Some("first".into()) },
            RegisterSportItem { sport_id: 2, description: None },
            RegisterSportItem { sport_id: 1, description: Some("second".into()) },
        ];
        let unique = dedupe_sports(items);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].sport_id, 1);
        assert_eq!(unique[0].description.as_deref(), Some("first"));
        assert_eq!(unique[1].sport_id, 2);
    }

    #[test]
    fn dedupe_preserves_singletons() {
        let items = vec![RegisterSportItem { sport_id: 9, description: None }];
        assert_eq!(dedupe_sports(items).len(), 1);
    }

    #[test]
    fn unknown_sports_register_as_not_found() {
        let err = missing_sports_error(&[4, 17]);
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Sports not found or deleted: 4, 17");
    }
}
