use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Success envelope. Every endpoint answers `{data, msg, status}`; errors
/// produce the same shape with `data: null` via `ApiError`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub msg: String,
    pub status: u16,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, msg: impl Into<String>) -> Self {
        Self {
            data,
            msg: msg.into(),
            status: StatusCode::OK.as_u16(),
        }
    }

    pub fn created(data: T, msg: impl Into<String>) -> Self {
        Self {
            data,
            msg: msg.into(),
            status: StatusCode::CREATED.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let code =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(self)).into_response()
    }
}

/// Page payload for list endpoints. `total_count` reflects the full filtered
/// set, not the page.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub has_next_page: bool,
    pub skip: i64,
    pub limit: i64,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(items: Vec<T>, total_count: i64, skip: i64, limit: i64) -> Self {
        Self {
            items,
            total_count,
            has_next_page: has_next_page(skip, limit, total_count),
            skip,
            limit,
        }
    }
}

/// True when another page exists past the current window.
pub fn has_next_page(skip: i64, limit: i64, total_count: i64) -> bool {
    skip + limit < total_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_page_flag_tracks_the_window() {
        assert!(has_next_page(0, 10, 11));
        assert!(!has_next_page(0, 10, 10));
        assert!(!has_next_page(10, 10, 10));
        assert!(has_next_page(10, 10, 21));
        assert!(!has_next_page(0, 10, 0));
    }

    #[test]
    fn success_envelope_shape() {
        let resp = ApiResponse::success(serde_json::json!({"id": 1}), "Tenant found");
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["msg"], "Tenant found");
        assert_eq!(body["status"], 200);
    }

    #[test]
    fn paginated_reports_window_and_total() {
        let page = Paginated::new(vec![1, 2, 3], 7, 0, 3);
        let body = serde_json::to_value(&page).unwrap();
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
        assert_eq!(body["total_count"], 7);
        assert_eq!(body["has_next_page"], true);
        assert_eq!(body["skip"], 0);
        assert_eq!(body["limit"], 3);
    }
}
