use crate::domain::error::{InventoryError, InventoryResult};
use crate::storage::photos::{PhotoStore, UploadedFile};
use crate::transport::http::types::ApiResponse;
use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::error;

/// Multipart field that carries the photo file.
pub const PHOTO_FIELD: &str = "photo";

impl InventoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::Validation(_) => StatusCode::BAD_REQUEST,
            InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::error(self.to_string()))).into_response()
    }
}

/// Path ids that are not unsigned integers cannot name a record.
pub fn parse_path_id(raw: &str) -> InventoryResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| InventoryError::not_found(format!("Inventory item with id {} not found", raw)))
}

/// Parses an optional JSON body. An empty body yields `T::default()`.
pub fn parse_json_body<T: DeserializeOwned + Default>(body: &Bytes) -> InventoryResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| InventoryError::validation(format!("Invalid JSON body: {}", e)))
}

/// Text fields and the staged photo of a multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub photo: Option<UploadedFile>,
}

impl UploadForm {
    pub fn take_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

/// Reads a multipart form, staging the `photo` part into the upload directory.
///
/// Only the first non-empty `photo` part is kept. If the form turns out to be malformed after
/// a photo was staged, the staged file is discarded before the error is returned.
pub async fn read_upload_form(
    photos: &PhotoStore,
    multipart: Result<Multipart, MultipartRejection>,
) -> InventoryResult<UploadForm> {
    let mut multipart = multipart.map_err(|e| {
        InventoryError::validation(format!("Expected multipart/form-data body: {}", e))
    })?;

    let mut form = UploadForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                discard_staged(photos, &form).await;
                return Err(InventoryError::validation(format!("Malformed multipart body: {}", e)));
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == PHOTO_FIELD {
            match stage_photo(photos, field, form.photo.is_some()).await {
                Ok(Some(upload)) => form.photo = Some(upload),
                Ok(None) => {}
                Err(e) => {
                    discard_staged(photos, &form).await;
                    return Err(e);
                }
            }
        } else {
            match field.text().await {
                Ok(text) => {
                    form.fields.entry(name).or_insert(text);
                }
                Err(e) => {
                    discard_staged(photos, &form).await;
                    return Err(InventoryError::validation(format!("Malformed multipart body: {}", e)));
                }
            }
        }
    }
    Ok(form)
}

/// Reads a registration body. Browsers post `multipart/form-data` when the form has a file
/// input; a plain urlencoded form is also accepted and never carries a photo.
pub async fn read_register_form<S: Send + Sync>(
    photos: &PhotoStore,
    request: Request,
    state: &S,
) -> InventoryResult<UploadForm> {
    if !is_urlencoded(request.headers()) {
        let multipart = Multipart::from_request(request, state).await;
        return read_upload_form(photos, multipart).await;
    }
    let Form(fields) = Form::<HashMap<String, String>>::from_request(request, state)
        .await
        .map_err(|e| InventoryError::validation(format!("Malformed form body: {}", e)))?;
    Ok(UploadForm {
        fields,
        photo: None,
    })
}

fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map_or(false, |mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

/// A part with no filename and no bytes is what browsers send for an empty file input.
async fn stage_photo(
    photos: &PhotoStore,
    field: Field<'_>,
    already_have_one: bool,
) -> InventoryResult<Option<UploadedFile>> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let data = field
        .bytes()
        .await
        .map_err(|e| InventoryError::validation(format!("Malformed multipart body: {}", e)))?;

    let no_file = data.is_empty() && file_name.as_deref().map_or(true, str::is_empty);
    if no_file || already_have_one {
        return Ok(None);
    }
    let upload = photos
        .stage(&data, content_type.as_deref(), file_name.as_deref())
        .await?;
    Ok(Some(upload))
}

async fn discard_staged(photos: &PhotoStore, form: &UploadForm) {
    if let Some(upload) = &form.photo {
        photos.discard(&upload.stored_name).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::http::types::UpdateInventoryRequest;

    #[test]
    fn path_id_must_be_unsigned() {
        assert_eq!(parse_path_id("12").unwrap(), 12);
        assert!(matches!(parse_path_id("-1"), Err(InventoryError::NotFound(_))));
        assert!(matches!(parse_path_id("abc"), Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn empty_body_is_default() {
        let req: UpdateInventoryRequest = parse_json_body(&Bytes::from_static(b"  ")).unwrap();
        assert!(req.inventory_name.is_none() && req.description.is_none());
    }

    #[test]
    fn malformed_body_is_validation_error() {
        let res: InventoryResult<UpdateInventoryRequest> =
            parse_json_body(&Bytes::from_static(b"{nope"));
        assert!(matches!(res, Err(InventoryError::Validation(_))));
    }

    #[test]
    fn urlencoded_content_type_is_detected() {
        let mut headers = HeaderMap::new();
        assert!(!is_urlencoded(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8".parse().unwrap(),
        );
        assert!(is_urlencoded(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=x".parse().unwrap(),
        );
        assert!(!is_urlencoded(&headers));
    }

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            InventoryError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(InventoryError::record_not_found(1).status_code(), StatusCode::NOT_FOUND);
        let io = InventoryError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
