use std::env;
use std::path::PathBuf;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let catalog_path = env::var_os("CATALOG_PATH")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            catalog_path,
            service_port,
            service_host,
        })
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.catalog_path {
            Some(path) => tracing::info!("  Catalog file: {}", path.display()),
            None => tracing::info!("  Catalog file: none (serving an empty catalog)"),
        }
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}
