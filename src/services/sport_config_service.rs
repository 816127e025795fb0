use sqlx::PgPool;

use crate::database::models::sport_config::{SportConfig, SportConfigCreate, SportConfigUpdate};
use crate::database::repository::Repository;
use crate::database::{sport_configs, sports};
use crate::error::ApiError;

pub struct SportConfigService {
    pool: PgPool,
    repo: Repository<SportConfig>,
}

impl SportConfigService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repo: Repository::new(),
        }
    }

    pub async fn get(&self, config_id: i32) -> Result<SportConfig, ApiError> {
        let config = self.repo.get(&self.pool, config_id).await?;
        config.ok_or_else(|| {
            ApiError::not_found(format!("Sport config with ID {} not found", config_id))
        })
    }

    /// All configs for a sport. The sport must exist and not be soft-deleted.
    pub async fn list_by_sport(&self, sport_id: i32) -> Result<Vec<SportConfig>, ApiError> {
        self.require_sport(sport_id).await?;
        let configs = sport_configs::list_by_sport_id(&self.pool, sport_id).await?;
        Ok(configs)
    }

    /// Create a batch of configs for one sport. An empty batch is rejected,
    /// every payload is validated up front, and the inserts run in a single
    /// transaction.
    pub async fn bulk_create(
        &self,
        sport_id: i32,
        configs: Vec<SportConfigCreate>,
    ) -> Result<Vec<SportConfig>, ApiError> {
        if configs.is_empty() {
            return Err(ApiError::bad_request("At least one config is required"));
        }
        for config in &configs {
            if config.config_type.trim().is_empty() {
                return Err(ApiError::bad_request("config_type must not be empty"));
            }
        }
        self.require_sport(sport_id).await?;

        let created = sport_configs::bulk_insert(&self.pool, sport_id, &configs).await?;
        tracing::info!(sport_id, count = created.len(), "sport configs created");
        Ok(created)
    }

    pub async fn update(
        &self,
        config_id: i32,
        payload: SportConfigUpdate,
    ) -> Result<SportConfig, ApiError> {
        if let Some(config_type) = &payload.config_type {
            if config_type.trim().is_empty() {
                return Err(ApiError::bad_request("config_type must not be empty"));
            }
        }

        let updated = sport_configs::update(&self.pool, config_id, &payload).await?;
        updated.ok_or_else(|| {
            ApiError::not_found(format!("Sport config with ID {} not found", config_id))
        })
    }

    /// Configs have no soft-delete flag; delete is always physical.
    pub async fn delete(&self, config_id: i32) -> Result<SportConfig, ApiError> {
        let removed = self.repo.delete(&self.pool, config_id).await?;
        removed.ok_or_else(|| {
            ApiError::not_found(format!("Sport config with ID {} not found", config_id))
        })
    }

    async fn require_sport(&self, sport_id: i32) -> Result<(), ApiError> {
        let (found, _) = sports::validate_sports_exist(&self.pool, &[sport_id]).await?;
        if found.is_empty() {
            return Err(ApiError::not_found(format!(
                "Sport with ID {} not found",
                sport_id
            )));
        }
        Ok(())
    }
}
