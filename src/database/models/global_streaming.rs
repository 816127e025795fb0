use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Entity;

/// Channel ARN to tenant name association. Pure data record, no business
/// rules.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GlobalStreaming {
    pub id: i32,
    pub channel_arn: String,
    pub tenant_name: String,
}

impl Entity for GlobalStreaming {
    const TABLE: &'static str = "global_streaming";
    const NAME: &'static str = "GlobalStreaming";
    const FIELDS: &'static [&'static str] = &["id", "channel_arn", "tenant_name"];
}
