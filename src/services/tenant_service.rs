use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::config;
use crate::database::models::mapping::TenantSportsMapping;
use crate::database::models::tenant::{Tenant, TenantCreate, TenantStatus, TenantUpdate};
use crate::database::repository::Repository;
use crate::database::{mappings, tenants};
use crate::database::tenants::TenantListFilter;
use crate::error::ApiError;
use crate::services::codes::normalize_code;

/// Tenant plus its sport mapping rows, for reads that opt in via
/// `include_sports`. The mapping rows carry the registration metadata
/// (status, created_by, description) the catalog rows do not.
#[derive(Debug, Serialize)]
pub struct TenantWithSports {
    #[serde(flatten)]
    pub tenant: Tenant,
    pub sports_mappings: Vec<TenantSportsMapping>,
}

/// Raw list-endpoint query parameters, before clamping.
#[derive(Debug, Clone, Default)]
pub struct TenantListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<TenantStatus>,
    pub search_id: Option<i32>,
    pub search: Option<String>,
    pub include_deleted: bool,
    pub sports_id: Option<i32>,
}

pub struct TenantService {
    pool: PgPool,
    repo: Repository<Tenant>,
}

impl TenantService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repo: Repository::new(),
        }
    }

    /// Fetch by id; soft-deleted rows read as missing.
    pub async fn get(&self, tenant_id: i32) -> Result<Tenant, ApiError> {
        let tenant = self.repo.get(&self.pool, tenant_id).await?;
        match tenant {
            Some(t) if !t.is_deleted => Ok(t),
            _ => Err(ApiError::not_found(format!(
                "Tenant with ID {} not found",
                tenant_id
            ))),
        }
    }

    pub async fn get_with_sports(&self, tenant_id: i32) -> Result<TenantWithSports, ApiError> {
        let tenant = self.get(tenant_id).await?;
        let sports_mappings = mappings::list_by_tenant(&self.pool, tenant.id, None).await?;
        Ok(TenantWithSports {
            tenant,
            sports_mappings,
        })
    }

    pub async fn get_by_code(&self, raw_code: &str) -> Result<Tenant, ApiError> {
        let code = normalize_code("Tenant code", raw_code)?;
        let tenant = tenants::find_by_code(&self.pool, &code).await?;
        match tenant {
            Some(t) if !t.is_deleted => Ok(t),
            _ => Err(ApiError::not_found(format!(
                "Tenant with code '{}' not found",
                code
            ))),
        }
    }

    /// Page through tenants. `skip`/`limit` are clamped to the configured
    /// bounds; out-of-range values degrade instead of erroring.
    pub async fn list(&self, params: TenantListParams) -> Result<(Vec<Tenant>, i64, i64, i64), ApiError> {
        let (skip, limit) = clamp_page(params.skip, params.limit);
        let filter = TenantListFilter {
            skip,
            limit,
            status: params.status,
            search_id: params.search_id,
            search: params.search,
            include_deleted: params.include_deleted,
            sports_id: params.sports_id,
        };
        let (items, total_count) = tenants::list(&self.pool, &filter).await?;
        Ok((items, total_count, skip, limit))
    }

    /// Create a tenant. The code is normalized and must be unique among all
    /// rows, deleted ones included, because the column constraint spans them.
    pub async fn create(&self, payload: TenantCreate) -> Result<Tenant, ApiError> {
        if payload.name.trim().is_empty() {
            return Err(ApiError::bad_request("Tenant name must not be empty"));
        }
        let code = normalize_code("Tenant code", &payload.tenant_code)?;

        if tenants::find_by_code(&self.pool, &code).await?.is_some() {
            return Err(ApiError::conflict(format!(
                "Tenant with code '{}' already exists",
                code
            )));
        }

        let tenant_uuid = payload.tenant_uuid.unwrap_or_else(Uuid::new_v4);
        if tenants::find_by_uuid(&self.pool, tenant_uuid).await?.is_some() {
            return Err(ApiError::conflict(format!(
                "Tenant with UUID '{}' already exists",
                tenant_uuid
            )));
        }

        let status = payload.status.unwrap_or(TenantStatus::Active);
        let tenant = tenants::insert(
            &self.pool,
            payload.name.trim(),
            &code,
            tenant_uuid,
            payload.logo.as_deref(),
            payload.address.as_deref(),
            payload.email.as_deref(),
            payload.description.as_deref(),
            status,
        )
        .await?;

        tracing::info!(tenant_id = tenant.id, code = %tenant.tenant_code, "tenant created");
        Ok(tenant)
    }

    /// Partial update. A code change is checked for uniqueness, but keeping
    /// the current code is not a conflict.
    pub async fn update(&self, tenant_id: i32, mut payload: TenantUpdate) -> Result<Tenant, ApiError> {
        let existing = self.get(tenant_id).await?;

        if let Some(raw_code) = payload.tenant_code.take() {
            let code = normalize_code("Tenant code", &raw_code)?;
            if let Some(other) = tenants::find_by_code(&self.pool, &code).await? {
                if other.id != existing.id {
                    return Err(ApiError::conflict(format!(
                        "Tenant with code '{}' already exists",
                        code
                    )));
                }
            }
            payload.tenant_code = Some(code);
        }

        let updated = tenants::update(&self.pool, tenant_id, &payload).await?;
        updated.ok_or_else(|| {
            ApiError::not_found(format!("Tenant with ID {} not found", tenant_id))
        })
    }

    /// Soft delete by default; `hard` removes the row and cascades to its
    /// mappings.
    pub async fn delete(&self, tenant_id: i32, hard: bool) -> Result<Tenant, ApiError> {
        let existing = self.get(tenant_id).await?;
        let removed = if hard {
            self.repo.delete(&self.pool, existing.id).await?
        } else {
            self.repo.soft_delete(&self.pool, existing.id).await?
        };
        removed.ok_or_else(|| {
            ApiError::not_found(format!("Tenant with ID {} not found", tenant_id))
        })
    }
}

/// Shared skip/limit clamping for all list endpoints.
pub fn clamp_page(skip: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let cfg = config();
    let skip = skip.unwrap_or(0).max(0);
    let limit = limit
        .unwrap_or(cfg.api.default_limit)
        .clamp(1, cfg.api.max_limit);
    (skip, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::mapping::MappingStatus;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn include_sports_payload_carries_mapping_rows() {
        let now = Utc::now();
        let tenant = Tenant {
            id: 1,
            name: "Acme".to_string(),
            tenant_code: "ACME".to_string(),
            logo: None,
            address: None,
            tenant_uuid: Uuid::new_v4(),
            email: None,
            description: None,
            status: TenantStatus::Active,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };
        let mapping = TenantSportsMapping {
            id: 5,
            tenant_id: 1,
            sport_id: 9,
            status: MappingStatus::Active,
            created_by: Some(1),
            created_at: now,
            updated_by: None,
            updated_at: now,
            description: Some("league".to_string()),
        };
        let payload = TenantWithSports {
            tenant,
            sports_mappings: vec![mapping],
        };

        let body = serde_json::to_value(&payload).unwrap();
        // Tenant fields flatten to the top level
        assert_eq!(body["tenant_code"], "ACME");
        let rows = body["sports_mappings"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["sport_id"], 9);
        assert_eq!(rows[0]["status"], "active");
        assert_eq!(rows[0]["created_by"], 1);
    }

    #[test]
    fn page_defaults_come_from_config() {
        let (skip, limit) = clamp_page(None, None);
        assert_eq!(skip, 0);
        assert_eq!(limit, config().api.default_limit);
    }

    #[test]
    fn page_bounds_are_clamped() {
        let (skip, limit) = clamp_page(Some(-5), Some(0));
        assert_eq!(skip, 0);
        assert_eq!(limit, 1);

        let (_, limit) = clamp_page(None, Some(i64::MAX));
        assert_eq!(limit, config().api.max_limit);
    }
}
