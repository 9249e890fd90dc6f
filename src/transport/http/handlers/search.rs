use crate::domain::error::InventoryError;
use crate::transport::http::handlers::common::parse_json_body;
use crate::transport::http::types::{
    ApiResponse, AppState, FindByIdQuery, InventoryLookup, InventorySummary, SearchRequest,
};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;

/// Value an HTML checkbox submits when ticked.
const CHECKBOX_ON: &str = "on";

#[utoipa::path(
    get,
    path = "/search",
    params(FindByIdQuery),
    responses(
        (status = 200, description = "Item found", body = ApiResponse),
        (status = 400, description = "id missing or not an integer", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse)
    )
)]
pub async fn find_by_id_handler(
    State(state): State<AppState>,
    Query(query): Query<FindByIdQuery>,
) -> Result<Json<ApiResponse>, InventoryError> {
    let include_photo = query.include_photo.as_deref() == Some(CHECKBOX_ON);
    let lookup = state
        .inventory
        .find_by_id(query.id.as_deref().unwrap_or_default(), include_photo)
        .await?;
    Ok(Json(ApiResponse::ok(InventoryLookup::from(lookup))))
}

#[utoipa::path(
    post,
    path = "/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Items matching any criterion", body = ApiResponse),
        (status = 400, description = "No criteria given or malformed body", body = ApiResponse)
    )
)]
pub async fn search_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse>, InventoryError> {
    let request: SearchRequest = parse_json_body(&body)?;
    let items: Vec<InventorySummary> = state
        .inventory
        .search(request.into())
        .await?
        .into_iter()
        .map(InventorySummary::from)
        .collect();
    let count = items.len();
    Ok(Json(ApiResponse::ok(items).with_count(count)))
}
