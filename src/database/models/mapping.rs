use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum MappingStatus {
    Active,
    Inactive,
}

impl MappingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingStatus::Active => "active",
            MappingStatus::Inactive => "inactive",
        }
    }
}

/// Association between one tenant and one sport. At most one row may exist
/// per (tenant_id, sport_id) pair; the table carries a unique constraint in
/// addition to the service-layer pre-check.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TenantSportsMapping {
    pub id: i32,
    pub tenant_id: i32,
    pub sport_id: i32,
    pub status: MappingStatus,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<i32>,
    pub updated_at: DateTime<Utc>,
    pub description: Option<String>,
}

impl Entity for TenantSportsMapping {
    const TABLE: &'static str = "tenant_sports_mapping";
    const NAME: &'static str = "TenantSportsMapping";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "tenant_id",
        "sport_id",
        "status",
        "created_by",
        "created_at",
        "updated_by",
        "updated_at",
        "description",
    ];
}

/// A fully resolved mapping row ready for insert.
#[derive(Debug, Clone)]
pub struct MappingCreate {
    pub tenant_id: i32,
    pub sport_id: i32,
    pub status: MappingStatus,
    pub created_by: Option<i32>,
    pub description: Option<String>,
}

/// Fields that can be updated on an existing mapping; setting status to
/// `inactive` is the "unregister without losing history" path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingUpdate {
    pub status: Option<MappingStatus>,
    pub description: Option<String>,
    pub updated_by: Option<i32>,
}
