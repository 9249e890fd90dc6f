use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (upload directory reachable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (upload directory missing)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let photos = state.inventory.photos();
    let records = state.inventory.count().await;

    if photos.is_reachable().await {
        (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({ "status": "ok", "records": records }))),
        )
            .into_response()
    } else {
        let mut body = ApiResponse::error(format!(
            "Upload directory {} is not reachable",
            photos.upload_dir().display()
        ));
        body.data = Some(serde_json::json!({ "status": "unhealthy" }));
        (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
}
