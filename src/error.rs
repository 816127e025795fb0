// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every variant renders as the standard `{data, msg, status}` envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - malformed/missing input
    BadRequest(String),

    // 400 Bad Request - duplicate unique key or duplicate mapping.
    // The upstream service surfaced conflicts as 400, so this stays 400
    // rather than 409.
    Conflict(String),

    // 404 Not Found - missing id/code/uuid, or soft-deleted row on a normal
    // read path
    NotFound(String),

    // 500 - a generic operation was invoked on an entity lacking the
    // required attribute; programming-contract violation, not user error
    Configuration(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Conflict(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Configuration(_) => 500,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Configuration(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to the standard envelope body
    pub fn to_json(&self) -> Value {
        json!({
            "data": Value::Null,
            "msg": self.message(),
            "status": self.status_code(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ApiError::Configuration(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert store-level errors to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            crate::database::manager::DatabaseError::UnknownField { entity, field } => {
                ApiError::configuration(format!("{} has no field '{}'", entity, field))
            }
            crate::database::manager::DatabaseError::ConfigMissing(name) => {
                tracing::error!("Missing configuration: {}", name);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            crate::database::manager::DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => {
                // A unique-constraint violation means two writers raced the
                // pre-check; surface it as the same conflict the pre-check
                // would have reported.
                if let sqlx::Error::Database(db_err) = &sqlx_err {
                    if db_err.is_unique_violation() {
                        return ApiError::conflict("Resource already exists");
                    }
                }
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::manager::DatabaseError;

    #[test]
    fn conflict_maps_to_400() {
        let err = ApiError::conflict("Tenant with code 'ACME' already exists");
        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        assert_eq!(body["status"], 400);
        assert_eq!(body["data"], Value::Null);
    }

    #[test]
    fn not_found_envelope_shape() {
        let err = ApiError::not_found("Tenant with ID 7 not found");
        let body = err.to_json();
        assert_eq!(body["status"], 404);
        assert_eq!(body["msg"], "Tenant with ID 7 not found");
    }

    #[test]
    fn unknown_field_is_configuration_error() {
        let err: ApiError = DatabaseError::UnknownField {
            entity: "Tenant",
            field: "nope".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Configuration(_)));
        assert_eq!(err.status_code(), 500);
    }
}
