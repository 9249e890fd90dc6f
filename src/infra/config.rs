//! Centralized configuration (command line + environment variables).
//!
//! Every option can be given on the command line or through the environment; a `.env` file
//! is loaded first by `ServerConfig::load`.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Name of the directory inside the cache directory that holds photo files.
pub const UPLOADS_DIR_NAME: &str = "uploads";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "inventory-service",
    about = "Inventory registration service",
    disable_help_flag = true
)]
pub struct ServerConfig {
    /// Address the server binds to.
    #[arg(short = 'h', long, env = "INVENTORY_HOST")]
    pub host: String,

    /// Port the server listens on.
    #[arg(short = 'p', long, env = "INVENTORY_PORT")]
    pub port: u16,

    /// Cache directory; uploaded photos go to `<cache>/uploads`.
    #[arg(short = 'c', long = "cache", env = "INVENTORY_CACHE_DIR")]
    pub cache_dir: String,

    /// Print help (`-h` is taken by `--host`).
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl ServerConfig {
    /// Loads `.env` (if any) and parses the process arguments. Exits with usage on error.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::parse()
    }

    /// Cache directory with `~` expanded.
    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.cache_dir).into_owned())
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.cache_path().join(UPLOADS_DIR_NAME)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log filter directive (`RUST_LOG`), defaults to `info`.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}
