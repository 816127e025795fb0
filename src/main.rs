use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod api;
mod config;
mod database;
mod error;
mod handlers;
mod services;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!("Starting CTMS API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("CTMS API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(tenant_routes())
        .merge(sport_routes())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn tenant_routes() -> Router {
    use axum::routing::{post, put};
    use handlers::tenant;

    Router::new()
        .route("/tenant", post(tenant::create_tenant).get(tenant::list_tenants))
        .route(
            "/tenant/:id",
            get(tenant::get_tenant)
                .put(tenant::update_tenant)
                .delete(tenant::delete_tenant),
        )
        .route("/tenant/code/:code", get(tenant::get_tenant_by_code))
        .route(
            "/tenant/:id/sports",
            post(tenant::register_sports).get(tenant::list_tenant_sports),
        )
        .route(
            "/tenant/:id/sports/:sport_id",
            put(tenant::update_tenant_sport),
        )
}

fn sport_routes() -> Router {
    use axum::routing::post;
    use handlers::sport;

    Router::new()
        .route("/sport", post(sport::create_sport).get(sport::list_sports))
        .route(
            "/sport/:id",
            get(sport::get_sport)
                .put(sport::update_sport)
                .delete(sport::delete_sport),
        )
        .route("/sport/code/:code", get(sport::get_sport_by_code))
        .route(
            "/sport/:id/config",
            post(sport::create_sport_configs).get(sport::list_sport_configs),
        )
        .route(
            "/sport/config/:id",
            axum::routing::put(sport::update_sport_config).delete(sport::delete_sport_config),
        )
}

/// CORS policy from configuration; a `*` origin means permissive.
fn cors_layer() -> CorsLayer {
    let origins = &crate::config::config().security.cors_origins;
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "data": {
            "name": "CTMS API",
            "version": version,
            "endpoints": {
                "tenant": "/tenant[/:id], /tenant/code/:code",
                "tenant_sports": "/tenant/:id/sports[/:sport_id]",
                "sport": "/sport[/:id], /sport/code/:code",
                "sport_config": "/sport/:id/config, /sport/config/:id",
                "health": "/health",
            }
        },
        "msg": "Welcome to the CTMS API",
        "status": 200,
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                },
                "msg": "Service healthy",
                "status": 200,
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database": "unavailable"
                    },
                    "msg": "Service degraded",
                    "status": 503,
                })),
            )
        }
    }
}
