use crate::domain::error::InventoryError;
use crate::transport::http::handlers::common::{parse_path_id, read_upload_form};
use crate::transport::http::types::{ApiResponse, AppState, InventoryItem};
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio_util::io::ReaderStream;

#[utoipa::path(
    get,
    path = "/inventory/{id}/photo",
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Photo bytes with the content type they were uploaded with"),
        (status = 404, description = "No such item, no photo, or photo file missing", body = ApiResponse)
    )
)]
pub async fn get_photo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, InventoryError> {
    let id = parse_path_id(&id)?;
    let photo = state.inventory.photo(id).await?;
    let body = Body::from_stream(ReaderStream::new(photo.file));
    Ok(([(header::CONTENT_TYPE, photo.mimetype)], body).into_response())
}

#[utoipa::path(
    put,
    path = "/inventory/{id}/photo",
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    request_body(content = PhotoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo replaced", body = ApiResponse),
        (status = 400, description = "No photo file in the form", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse)
    )
)]
pub async fn replace_photo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse>, InventoryError> {
    let mut form = read_upload_form(state.inventory.photos(), multipart).await?;
    let id = match parse_path_id(&id) {
        Ok(id) => id,
        Err(e) => {
            if let Some(upload) = form.photo.take() {
                state.inventory.photos().discard(&upload.stored_name).await;
            }
            return Err(e);
        }
    };
    let record = state.inventory.replace_photo(id, form.photo.take()).await?;
    Ok(Json(
        ApiResponse::ok(InventoryItem::from(&record)).with_message("Photo updated"),
    ))
}
