use crate::transport::http::handlers::{forms, health, inventory, photos, search};
use crate::transport::http::types::{
    ApiResponse, InventoryItem, InventoryLookup, InventorySummary, PhotoForm, RegisterForm,
    SearchRequest, UpdateInventoryRequest,
};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        inventory::register_handler,
        inventory::list_handler,
        inventory::get_handler,
        inventory::update_handler,
        inventory::delete_handler,
        photos::get_photo_handler,
        photos::replace_photo_handler,
        search::find_by_id_handler,
        search::search_handler
    ),
    components(schemas(
        ApiResponse,
        InventoryItem,
        InventorySummary,
        InventoryLookup,
        RegisterForm,
        PhotoForm,
        UpdateInventoryRequest,
        SearchRequest
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/", get(forms::register_form_handler))
        .route("/RegisterForm.html", get(forms::register_form_handler))
        .route("/SearchForm.html", get(forms::search_form_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/register", post(inventory::register_handler))
        .route("/inventory", get(inventory::list_handler))
        .route(
            "/inventory/:id",
            get(inventory::get_handler)
                .put(inventory::update_handler)
                .delete(inventory::delete_handler),
        )
        .route(
            "/inventory/:id/photo",
            get(photos::get_photo_handler).put(photos::replace_photo_handler),
        )
        .route(
            "/search",
            get(search::find_by_id_handler).post(search::search_handler),
        )
        // Photo size is not limited.
        .layer(DefaultBodyLimit::disable())
        .with_state(app_state)
}
