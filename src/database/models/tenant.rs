use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::{Entity, SoftDelete};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TenantStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
    OnHold,
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "active",
            TenantStatus::Inactive => "inactive",
            TenantStatus::Suspended => "suspended",
            TenantStatus::Pending => "pending",
            TenantStatus::OnHold => "on_hold",
        }
    }
}

/// An organization/customer row. `tenant_code` and `tenant_uuid` are unique
/// across all rows, soft-deleted ones included.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: i32,
    pub name: String,
    pub tenant_code: String,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub tenant_uuid: Uuid,
    pub email: Option<String>,
    pub description: Option<String>,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Entity for Tenant {
    const TABLE: &'static str = "tenants";
    const NAME: &'static str = "Tenant";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "tenant_code",
        "logo",
        "address",
        "tenant_uuid",
        "email",
        "description",
        "status",
        "created_at",
        "updated_at",
        "is_deleted",
    ];
}

impl SoftDelete for Tenant {}

/// Fields accepted when creating a tenant. The UUID is generated server-side
/// when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantCreate {
    pub name: String,
    pub tenant_code: String,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub tenant_uuid: Option<Uuid>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub status: Option<TenantStatus>,
}

/// Fields that can be updated on an existing tenant. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantUpdate {
    pub name: Option<String>,
    pub tenant_code: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub status: Option<TenantStatus>,
}
