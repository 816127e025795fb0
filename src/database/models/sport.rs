use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::{Entity, SoftDelete};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SportStatus {
    Active,
    Inactive,
    Suspended,
}

impl SportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SportStatus::Active => "active",
            SportStatus::Inactive => "inactive",
            SportStatus::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SportCategory {
    RacketSports,
    FieldSports,
    MixedSports,
    Other,
}

impl SportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SportCategory::RacketSports => "racket_sports",
            SportCategory::FieldSports => "field_sports",
            SportCategory::MixedSports => "mixed_sports",
            SportCategory::Other => "other",
        }
    }
}

/// A sports-catalog row, identified by a unique upper-cased code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sport {
    pub id: i32,
    pub sport_code: String,
    pub sport_name: String,
    pub category: Option<SportCategory>,
    pub icon_url: Option<String>,
    pub status: SportStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Entity for Sport {
    const TABLE: &'static str = "sports";
    const NAME: &'static str = "Sport";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "sport_code",
        "sport_name",
        "category",
        "icon_url",
        "status",
        "description",
        "created_at",
        "updated_at",
        "is_deleted",
    ];
}

impl SoftDelete for Sport {}

/// Fields accepted when creating a sport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportCreate {
    pub sport_code: String,
    pub sport_name: String,
    pub category: Option<SportCategory>,
    pub icon_url: Option<String>,
    pub status: Option<SportStatus>,
    pub description: Option<String>,
}

/// Fields that can be updated on an existing sport. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SportUpdate {
    pub sport_code: Option<String>,
    pub sport_name: Option<String>,
    pub category: Option<SportCategory>,
    pub icon_url: Option<String>,
    pub status: Option<SportStatus>,
    pub description: Option<String>,
}
