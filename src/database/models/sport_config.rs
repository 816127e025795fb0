use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ConfigStatus {
    Active,
    Inactive,
}

impl ConfigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigStatus::Active => "active",
            ConfigStatus::Inactive => "inactive",
        }
    }
}

/// Per-sport configuration record. `config_type` is an open, caller-defined
/// string; the valid vocabulary is still owned by the callers. Rows are
/// removed by the cascade when the parent sport is hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SportConfig {
    pub id: i32,
    pub sport_id: i32,
    pub config_type: String,
    pub config_data: Option<serde_json::Value>,
    pub status: ConfigStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i32>,
    pub description: Option<String>,
}

impl Entity for SportConfig {
    const TABLE: &'static str = "sports_config";
    const NAME: &'static str = "SportConfig";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "sport_id",
        "config_type",
        "config_data",
        "status",
        "created_at",
        "updated_at",
        "created_by",
        "description",
    ];
}

/// One config in a bulk-create request; `sport_id` comes from the URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportConfigCreate {
    pub config_type: String,
    pub config_data: Option<serde_json::Value>,
    pub status: Option<ConfigStatus>,
    pub created_by: Option<i32>,
    pub description: Option<String>,
}

/// Fields that can be updated on an existing config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SportConfigUpdate {
    pub config_type: Option<String>,
    pub config_data: Option<serde_json::Value>,
    pub status: Option<ConfigStatus>,
    pub description: Option<String>,
}
