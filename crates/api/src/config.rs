use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default plugin-block providers offered in the add-content inventory.
pub const DEFAULT_BLOCK_PROVIDERS: &str = "system";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Optional JSON file with the layout catalog; the built-in catalog is
    /// used when unset.
    pub layout_catalog_path: Option<PathBuf>,
    /// Plugin-block providers listed in the add-content inventory.
    pub block_providers: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `LAYOUT_CATALOG_PATH`    | unset                      |
    /// | `LAYOUT_BLOCK_PROVIDERS` | `system`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let layout_catalog_path = std::env::var("LAYOUT_CATALOG_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let block_providers = split_list(
            &std::env::var("LAYOUT_BLOCK_PROVIDERS")
                .unwrap_or_else(|_| DEFAULT_BLOCK_PROVIDERS.into()),
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            layout_catalog_path,
            block_providers,
        }
    }
}

/// Split a comma-separated env value, dropping empty entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
