// GET / and GET /health: liveness endpoints. Both always return 200.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// GET /: service banner.
pub async fn home() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Tracer API is running",
        "status": "online",
    }))
}

/// GET /health: health check for load balancers.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "message": "Backend operational",
        })),
    )
}
