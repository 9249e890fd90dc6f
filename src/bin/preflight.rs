use inventory_service::infra::config::ServerConfig;
use inventory_service::PhotoStore;

/// Checks the configuration and the upload directory before the service is started.
///
/// Takes the same options as `api_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load();

    println!("> Preflight:");
    println!("  bind address = {}", config.bind_addr());
    println!("  cache dir    = {}", config.cache_path().display());

    let upload_dir = config.upload_dir();
    let photos = PhotoStore::new(&upload_dir);
    photos
        .ensure_dir()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", upload_dir.display(), e))?;
    println!("  upload dir   = {} (ok)", upload_dir.display());

    // Round trip through the same primitives the service uses.
    let probe = b"inventory-preflight";
    let staged = photos
        .stage(probe, Some("text/plain"), None)
        .await
        .map_err(|e| anyhow::anyhow!("Write check failed: {}", e))?;
    let read_back = tokio::fs::read(upload_dir.join(&staged.stored_name)).await;
    photos.discard(&staged.stored_name).await;
    match read_back {
        Ok(bytes) if bytes == probe => println!("  write/read/delete check: ok"),
        Ok(_) => anyhow::bail!("Read-back mismatch in {}", upload_dir.display()),
        Err(e) => anyhow::bail!("Read check failed: {}", e),
    }

    // Make sure the address can actually be bound.
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .map_err(|e| anyhow::anyhow!("Cannot bind {}: {}", config.bind_addr(), e))?;
    drop(listener);
    println!("  bind check: ok");

    println!("> Preflight passed.");
    Ok(())
}
