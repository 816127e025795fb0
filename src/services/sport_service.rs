use sqlx::PgPool;

use crate::database::models::sport::{
    Sport, SportCategory, SportCreate, SportStatus, SportUpdate,
};
use crate::database::repository::Repository;
use crate::database::sports;
use crate::database::sports::SportListFilter;
use crate::error::ApiError;
use crate::services::codes::normalize_code;
use crate::services::tenant_service::clamp_page;

/// Raw list-endpoint query parameters, before clamping.
#[derive(Debug, Clone, Default)]
pub struct SportListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<SportStatus>,
    pub category: Option<SportCategory>,
    pub search_id: Option<i32>,
    pub search: Option<String>,
    pub include_deleted: bool,
}

pub struct SportService {
    pool: PgPool,
    repo: Repository<Sport>,
}

impl SportService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repo: Repository::new(),
        }
    }

    /// Fetch by id; soft-deleted rows read as missing.
    pub async fn get(&self, sport_id: i32) -> Result<Sport, ApiError> {
        let sport = self.repo.get(&self.pool, sport_id).await?;
        match sport {
            Some(s) if !s.is_deleted => Ok(s),
            _ => Err(ApiError::not_found(format!(
                "Sport with ID {} not found",
                sport_id
            ))),
        }
    }

    pub async fn get_by_code(&self, raw_code: &str) -> Result<Sport, ApiError> {
        let code = normalize_code("Sport code", raw_code)?;
        let sport = sports::find_by_code(&self.pool, &code).await?;
        match sport {
            Some(s) if !s.is_deleted => Ok(s),
            _ => Err(ApiError::not_found(format!(
                "Sport with code '{}' not found",
                code
            ))),
        }
    }

    pub async fn list(&self, params: SportListParams) -> Result<(Vec<Sport>, i64, i64, i64), ApiError> {
        let (skip, limit) = clamp_page(params.skip, params.limit);
        let filter = SportListFilter {
            skip,
            limit,
            status: params.status,
            category: params.category,
            search_id: params.search_id,
            search: params.search,
            include_deleted: params.include_deleted,
        };
        let (items, total_count) = sports::list(&self.pool, &filter).await?;
        Ok((items, total_count, skip, limit))
    }

    pub async fn create(&self, payload: SportCreate) -> Result<Sport, ApiError> {
        if payload.sport_name.trim().is_empty() {
            return Err(ApiError::bad_request("Sport name must not be empty"));
        }
        let code = normalize_code("Sport code", &payload.sport_code)?;

        if sports::find_by_code(&self.pool, &code).await?.is_some() {
            return Err(ApiError::conflict(format!(
                "Sport with code '{}' already exists",
                code
            )));
        }

        let status = payload.status.unwrap_or(SportStatus::Active);
        let sport = sports::insert(
            &self.pool,
            &code,
            payload.sport_name.trim(),
            payload.category,
            payload.icon_url.as_deref(),
            status,
            payload.description.as_deref(),
        )
        .await?;

        tracing::info!(sport_id = sport.id, code = %sport.sport_code, "sport created");
        Ok(sport)
    }

    /// Partial update; keeping the current code is not a conflict.
    pub async fn update(&self, sport_id: i32, mut payload: SportUpdate) -> Result<Sport, ApiError> {
        let existing = self.get(sport_id).await?;

        if let Some(raw_code) = payload.sport_code.take() {
            let code = normalize_code("Sport code", &raw_code)?;
            if let Some(other) = sports::find_by_code(&self.pool, &code).await? {
                if other.id != existing.id {
                    return Err(ApiError::conflict(format!(
                        "Sport with code '{}' already exists",
                        code
                    )));
                }
            }
            payload.sport_code = Some(code);
        }

        let updated = sports::update(&self.pool, sport_id, &payload).await?;
        updated.ok_or_else(|| ApiError::not_found(format!("Sport with ID {} not found", sport_id)))
    }

    /// Soft delete by default; `hard` removes the row and cascades to its
    /// configs and mappings.
    pub async fn delete(&self, sport_id: i32, hard: bool) -> Result<Sport, ApiError> {
        let existing = self.get(sport_id).await?;
        let removed = if hard {
            self.repo.delete(&self.pool, existing.id).await?
        } else {
            self.repo.soft_delete(&self.pool, existing.id).await?
        };
        removed.ok_or_else(|| ApiError::not_found(format!("Sport with ID {} not found", sport_id)))
    }
}
