use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;

use crate::api::{ApiResponse, Paginated};
use crate::database::models::mapping::{MappingStatus, MappingUpdate, TenantSportsMapping};
use crate::database::models::tenant::{Tenant, TenantCreate, TenantStatus, TenantUpdate};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::services::mapping_service::BulkRegisterRequest;
use crate::services::tenant_service::{TenantListParams, TenantWithSports};
use crate::services::{MappingService, TenantService};

async fn service() -> Result<TenantService, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(TenantService::new(pool))
}

async fn mapping_service() -> Result<MappingService, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(MappingService::new(pool))
}

#[derive(Debug, Deserialize)]
pub struct TenantListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<TenantStatus>,
    pub search_id: Option<i32>,
    pub search: Option<String>,
    #[serde(default)]
    pub include_deleted: bool,
    pub sports_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct GetTenantQuery {
    #[serde(default)]
    pub include_sports: bool,
}

fn default_soft_delete() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default = "default_soft_delete")]
    pub soft_delete: bool,
}

#[derive(Debug, Deserialize)]
pub struct MappingListQuery {
    pub status: Option<MappingStatus>,
}

pub async fn create_tenant(
    Json(payload): Json<TenantCreate>,
) -> Result<ApiResponse<Tenant>, ApiError> {
    let tenant = service().await?.create(payload).await?;
    Ok(ApiResponse::created(tenant, "Tenant created successfully"))
}

pub async fn list_tenants(
    Query(query): Query<TenantListQuery>,
) -> Result<ApiResponse<Paginated<Tenant>>, ApiError> {
    let params = TenantListParams {
        skip: query.skip,
        limit: query.limit,
        status: query.status,
        search_id: query.search_id,
        search: query.search,
        include_deleted: query.include_deleted,
        sports_id: query.sports_id,
    };
    let (items, total_count, skip, limit) = service().await?.list(params).await?;
    let page = Paginated::new(items, total_count, skip, limit);
    Ok(ApiResponse::success(page, "Tenants retrieved successfully"))
}

/// `include_sports=true` switches the payload to the tenant-with-sports
/// shape; the envelope stays the same.
pub async fn get_tenant(
    Path(tenant_id): Path<i32>,
    Query(query): Query<GetTenantQuery>,
) -> Result<axum::response::Response, ApiError> {
    use axum::response::IntoResponse;

    let service = service().await?;
    if query.include_sports {
        let tenant: TenantWithSports = service.get_with_sports(tenant_id).await?;
        Ok(ApiResponse::success(tenant, "Tenant retrieved successfully").into_response())
    } else {
        let tenant = service.get(tenant_id).await?;
        Ok(ApiResponse::success(tenant, "Tenant retrieved successfully").into_response())
    }
}

pub async fn get_tenant_by_code(
    Path(code): Path<String>,
) -> Result<ApiResponse<Tenant>, ApiError> {
    let tenant = service().await?.get_by_code(&code).await?;
    Ok(ApiResponse::success(tenant, "Tenant retrieved successfully"))
}

pub async fn update_tenant(
    Path(tenant_id): Path<i32>,
    Json(payload): Json<TenantUpdate>,
) -> Result<ApiResponse<Tenant>, ApiError> {
    let tenant = service().await?.update(tenant_id, payload).await?;
    Ok(ApiResponse::success(tenant, "Tenant updated successfully"))
}

pub async fn delete_tenant(
    Path(tenant_id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<ApiResponse<Tenant>, ApiError> {
    let tenant = service().await?.delete(tenant_id, !query.soft_delete).await?;
    Ok(ApiResponse::success(tenant, "Tenant deleted successfully"))
}

pub async fn register_sports(
    Path(tenant_id): Path<i32>,
    Json(payload): Json<BulkRegisterRequest>,
) -> Result<ApiResponse<Vec<TenantSportsMapping>>, ApiError> {
    let created = mapping_service().await?.bulk_register(tenant_id, payload).await?;
    Ok(ApiResponse::created(created, "Sports registered successfully"))
}

pub async fn list_tenant_sports(
    Path(tenant_id): Path<i32>,
    Query(query): Query<MappingListQuery>,
) -> Result<ApiResponse<Vec<TenantSportsMapping>>, ApiError> {
    let rows = mapping_service()
        .await?
        .list_for_tenant(tenant_id, query.status)
        .await?;
    Ok(ApiResponse::success(rows, "Tenant sports retrieved successfully"))
}

pub async fn update_tenant_sport(
    Path((tenant_id, sport_id)): Path<(i32, i32)>,
    Json(payload): Json<MappingUpdate>,
) -> Result<ApiResponse<TenantSportsMapping>, ApiError> {
    let mapping = mapping_service()
        .await?
        .update_by_tenant_sport(tenant_id, sport_id, payload)
        .await?;
    Ok(ApiResponse::success(mapping, "Mapping updated successfully"))
}
