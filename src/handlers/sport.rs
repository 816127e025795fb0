use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;

use crate::api::{ApiResponse, Paginated};
use crate::database::models::sport::{
    Sport, SportCategory, SportCreate, SportStatus, SportUpdate,
};
use crate::database::models::sport_config::{
    SportConfig, SportConfigCreate, SportConfigUpdate,
};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::services::sport_service::SportListParams;
use crate::services::{SportConfigService, SportService};

async fn service() -> Result<SportService, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(SportService::new(pool))
}

async fn config_service() -> Result<SportConfigService, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(SportConfigService::new(pool))
}

#[derive(Debug, Deserialize)]
pub struct SportListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<SportStatus>,
    pub category: Option<SportCategory>,
    pub search_id: Option<i32>,
    pub search: Option<String>,
    #[serde(default)]
    pub include_deleted: bool,
}

fn default_soft_delete() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default = "default_soft_delete")]
    pub soft_delete: bool,
}

pub async fn create_sport(
    Json(payload): Json<SportCreate>,
) -> Result<ApiResponse<Sport>, ApiError> {
    let sport = service().await?.create(payload).await?;
    Ok(ApiResponse::created(sport, "Sport created successfully"))
}

pub async fn list_sports(
    Query(query): Query<SportListQuery>,
) -> Result<ApiResponse<Paginated<Sport>>, ApiError> {
    let params = SportListParams {
        skip: query.skip,
        limit: query.limit,
        status: query.status,
        category: query.category,
        search_id: query.search_id,
        search: query.search,
        include_deleted: query.include_deleted,
    };
    let (items, total_count, skip, limit) = service().await?.list(params).await?;
    let page = Paginated::new(items, total_count, skip, limit);
    Ok(ApiResponse::success(page, "Sports retrieved successfully"))
}

pub async fn get_sport(Path(sport_id): Path<i32>) -> Result<ApiResponse<Sport>, ApiError> {
    let sport = service().await?.get(sport_id).await?;
    Ok(ApiResponse::success(sport, "Sport retrieved successfully"))
}

pub async fn get_sport_by_code(
    Path(code): Path<String>,
) -> Result<ApiResponse<Sport>, ApiError> {
    let sport = service().await?.get_by_code(&code).await?;
    Ok(ApiResponse::success(sport, "Sport retrieved successfully"))
}

pub async fn update_sport(
    Path(sport_id): Path<i32>,
    Json(payload): Json<SportUpdate>,
) -> Result<ApiResponse<Sport>, ApiError> {
    let sport = service().await?.update(sport_id, payload).await?;
    Ok(ApiResponse::success(sport, "Sport updated successfully"))
}

pub async fn delete_sport(
    Path(sport_id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<ApiResponse<Sport>, ApiError> {
    let sport = service().await?.delete(sport_id, !query.soft_delete).await?;
    Ok(ApiResponse::success(sport, "Sport deleted successfully"))
}

pub async fn create_sport_configs(
    Path(sport_id): Path<i32>,
    Json(payload): Json<Vec<SportConfigCreate>>,
) -> Result<ApiResponse<Vec<SportConfig>>, ApiError> {
    let created = config_service().await?.bulk_create(sport_id, payload).await?;
    Ok(ApiResponse::created(created, "Sport configs created successfully"))
}

pub async fn list_sport_configs(
    Path(sport_id): Path<i32>,
) -> Result<ApiResponse<Vec<SportConfig>>, ApiError> {
    let configs = config_service().await?.list_by_sport(sport_id).await?;
    Ok(ApiResponse::success(configs, "Sport configs retrieved successfully"))
}

pub async fn update_sport_config(
    Path(config_id): Path<i32>,
    Json(payload): Json<SportConfigUpdate>,
) -> Result<ApiResponse<SportConfig>, ApiError> {
    let config = config_service().await?.update(config_id, payload).await?;
    Ok(ApiResponse::success(config, "Sport config updated successfully"))
}

pub async fn delete_sport_config(
    Path(config_id): Path<i32>,
) -> Result<ApiResponse<SportConfig>, ApiError> {
    let config = config_service().await?.delete(config_id).await?;
    Ok(ApiResponse::success(config, "Sport config deleted successfully"))
}
