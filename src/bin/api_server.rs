// src/bin/api_server.rs

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use inventory_service::infra::config::ServerConfig;
use inventory_service::infra::telemetry;
use inventory_service::transport;
use inventory_service::{InventoryService, PhotoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load();
    telemetry::init();

    // --- Upload Directory Initialization ---
    let upload_dir = config.upload_dir();
    println!("> Preparing upload directory {}...", upload_dir.display());
    let photos = PhotoStore::new(&upload_dir);
    if let Err(e) = photos.ensure_dir().await {
        eprintln!("> Could not create upload directory {}: {}", upload_dir.display(), e);
        std::process::exit(1);
    }

    // --- Service Initialization ---
    println!("> Initializing InventoryService (in-memory, starts empty)...");
    let app_state = transport::http::AppState {
        inventory: Arc::new(InventoryService::new(photos)),
    };

    // --- API Server Initialization ---
    println!("> Starting API server...");
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    println!("> API server listening on http://{}", bind_addr);
    println!("> Swagger UI available at http://{}/docs", bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n> Shutdown signal received (Ctrl+C). In-memory inventory is discarded.");
        }
    }

    Ok(())
}
