use crate::domain::error::InventoryError;
use crate::transport::http::handlers::common::{
    parse_json_body, parse_path_id, read_register_form,
};
use crate::transport::http::types::{
    ApiResponse, AppState, InventoryItem, InventorySummary, UpdateInventoryRequest,
};
use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    post,
    path = "/register",
    request_body(
        content = RegisterForm,
        content_type = "multipart/form-data",
        description = "Photo-less registrations may also be sent as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "Item registered", body = ApiResponse),
        (status = 400, description = "inventory_name missing or malformed form", body = ApiResponse),
        (status = 500, description = "Photo could not be stored", body = ApiResponse)
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<ApiResponse>), InventoryError> {
    let mut form = read_register_form(state.inventory.photos(), request, &state).await?;
    let inventory_name = form.take_field("inventory_name");
    let description = form.take_field("description");

    let record = state
        .inventory
        .create(inventory_name, description, form.photo.take())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(InventoryItem::from(&record)).with_message("Item registered")),
    ))
}

#[utoipa::path(
    get,
    path = "/inventory",
    responses(
        (status = 200, description = "All items in registration order", body = ApiResponse)
    )
)]
pub async fn list_handler(State(state): State<AppState>) -> Json<ApiResponse> {
    let items: Vec<InventorySummary> = state
        .inventory
        .list()
        .await
        .into_iter()
        .map(InventorySummary::from)
        .collect();
    let count = items.len();
    Json(ApiResponse::ok(items).with_count(count))
}

#[utoipa::path(
    get,
    path = "/inventory/{id}",
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse)
    )
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, InventoryError> {
    let id = parse_path_id(&id)?;
    let record = state.inventory.get(id).await?;
    Ok(Json(ApiResponse::ok(InventoryItem::from(&record))))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}",
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    request_body = UpdateInventoryRequest,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse),
        (status = 400, description = "Body empty or malformed", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse)
    )
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse>, InventoryError> {
    let id = parse_path_id(&id)?;
    let request: UpdateInventoryRequest = parse_json_body(&body)?;
    let record = state.inventory.update(id, request.into()).await?;
    Ok(Json(
        ApiResponse::ok(InventoryItem::from(&record)).with_message("Item updated"),
    ))
}

#[utoipa::path(
    delete,
    path = "/inventory/{id}",
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item and its photo deleted", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse)
    )
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, InventoryError> {
    let id = parse_path_id(&id)?;
    state.inventory.delete(id).await?;
    Ok(Json(ApiResponse::message(format!("Item {} deleted", id))))
}
