use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Entity;

/// Generic async-task tracking row. Pure data record, no business rules.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub task_id: String,
    pub tenant_name: String,
    pub service_name: String,
    pub task_name: String,
    pub status: String,
    pub progress: Option<i32>,
    pub total: Option<i32>,
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
    pub parameters: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Entity for Job {
    const TABLE: &'static str = "jobs";
    const NAME: &'static str = "Job";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "task_id",
        "tenant_name",
        "service_name",
        "task_name",
        "status",
        "progress",
        "total",
        "result",
        "error",
        "parameters",
        "created_at",
        "started_at",
        "completed_at",
        "expires_at",
    ];
}
