use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::PhotoStorage;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "conservatory.db";
pub const DEFAULT_PHOTOS_DIR: &str = "photos";
pub const DEFAULT_DELETED_PHOTOS_DIR: &str = "deleted_photos";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runtime settings for the HTTP server.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```toml
/// port = 8080
/// photos_dir = "/var/lib/conservatory/photos"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// SQLite file path, or `:memory:`
    pub database: String,
    pub photos_dir: PathBuf,
    pub deleted_photos_dir: PathBuf,
    /// Allowed CORS origin; any origin when unset
    pub cors_origin: Option<String>,
    /// Base URL the GraphQL façade uses to reach the REST API
    pub api_base_url: Option<String>,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            photos_dir: PathBuf::from(DEFAULT_PHOTOS_DIR),
            deleted_photos_dir: PathBuf::from(DEFAULT_DELETED_PHOTOS_DIR),
            cors_origin: None,
            api_base_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Invalid server configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Read `path` when given, otherwise fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", self.port))
    }

    pub fn photo_storage(&self) -> PhotoStorage {
        PhotoStorage::new(self.photos_dir.clone(), self.deleted_photos_dir.clone())
    }
}
