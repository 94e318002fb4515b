//! Configuration loading
//!
//! Resolution priority, highest first:
//! 1. Command-line overrides (`ConfigOverrides`)
//! 2. Process environment
//! 3. Credentials file (`.env` format, never overrides variables already set)
//! 4. TOML config file
//! 5. Compiled defaults
//!
//! The resolved `AppConfig` is built once at startup and handed to each
//! component; nothing reads the environment after that.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

pub const ENV_STORE_CONNECTION_STRING: &str = "STORE_CONNECTION_STRING";
/// Accepted for deployments that still carry the old variable name
pub const ENV_LEGACY_STORE_CONNECTION_STRING: &str = "MONGO_CONNECTION_STRING";
pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const ENV_HOST: &str = "TUNECAST_HOST";
pub const ENV_PORT: &str = "TUNECAST_PORT";
pub const ENV_STATIC_DIR: &str = "TUNECAST_STATIC_DIR";
pub const ENV_SEARCH_LIMIT: &str = "TUNECAST_SEARCH_LIMIT";
pub const ENV_RELATED_USERS: &str = "TUNECAST_RELATED_USERS";

/// Compiled defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
/// Set `static_dir = "."` to serve the working directory instead
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_CONNECTION_STRING: &str = "sqlite://tunecast.db?mode=rwc";
/// Also the number of submissions that can be in flight at once
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials/.env";

/// Catalog search accepts at most this many results per page
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Which stored submissions are listed next to the track results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelatedUsersScope {
    /// Only submissions whose genre equals the submitted genre exactly
    #[default]
    Genre,
    /// Every stored submission
    All,
}

impl FromStr for RelatedUsersScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "genre" => Ok(Self::Genre),
            "all" => Ok(Self::All),
            other => Err(Error::Config(format!(
                "related users scope must be 'genre' or 'all', got '{}'",
                other
            ))),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as static assets behind the routed pages
    pub static_dir: PathBuf,
}

/// Submission store settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// sqlx SQLite URL, e.g. `sqlite://tunecast.db?mode=rwc`
    pub connection_string: String,
    pub max_connections: u32,
}

/// Music catalog API settings
#[derive(Clone)]
pub struct CatalogConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_base_url: String,
    pub search_limit: u32,
    pub timeout_secs: u64,
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("search_limit", &self.search_limit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub catalog: CatalogConfig,
    pub related_users: RelatedUsersScope,
}

/// TOML config file layout; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: TomlServer,
    pub store: TomlStore,
    pub catalog: TomlCatalog,
    pub related_users: Option<RelatedUsersScope>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlServer {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlStore {
    pub connection_string: Option<String>,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlCatalog {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: Option<String>,
    pub api_base_url: Option<String>,
    pub search_limit: Option<u32>,
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
    pub store_connection_string: Option<String>,
    pub config_file: Option<PathBuf>,
    pub credentials_file: Option<PathBuf>,
}

/// Load the credentials file into the process environment
///
/// Variables already present in the environment win. A missing file is not
/// an error; returns whether the file was loaded.
pub fn load_credentials_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            info!("Loaded credentials file: {}", path.display());
            Ok(true)
        }
        Err(e) if e.not_found() => {
            warn!("Credentials file not found: {} (using environment only)", path.display());
            Ok(false)
        }
        Err(e) => Err(Error::Config(format!(
            "Failed to read credentials file {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Read the TOML config file, or defaults when it does not exist
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file not found: {} (using defaults)", path.display());
        return Ok(TomlConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    info!("Loaded config file: {}", path.display());
    Ok(config)
}

impl AppConfig {
    /// Load configuration from every source, reading the live environment
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let credentials = overrides
            .credentials_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE));
        load_credentials_file(&credentials)?;

        let toml_config = match &overrides.config_file {
            Some(path) => load_toml_config(path)?,
            None => TomlConfig::default(),
        };

        Self::resolve(overrides, |key| std::env::var(key).ok(), toml_config)
    }

    /// Merge overrides, an environment lookup and a TOML config
    pub fn resolve<F>(overrides: &ConfigOverrides, env: F, toml_config: TomlConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let host = overrides
            .host
            .clone()
            .or_else(|| env(ENV_HOST))
            .or(toml_config.server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match (overrides.port, env(ENV_PORT)) {
            (Some(port), _) => port,
            (None, Some(raw)) => parse_value(ENV_PORT, &raw)?,
            (None, None) => toml_config.server.port.unwrap_or(DEFAULT_PORT),
        };

        let static_dir = overrides
            .static_dir
            .clone()
            .or_else(|| env(ENV_STATIC_DIR).map(PathBuf::from))
            .or(toml_config.server.static_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let connection_string = overrides
            .store_connection_string
            .clone()
            .or_else(|| env(ENV_STORE_CONNECTION_STRING))
            .or_else(|| env(ENV_LEGACY_STORE_CONNECTION_STRING))
            .or(toml_config.store.connection_string)
            .unwrap_or_else(|| DEFAULT_CONNECTION_STRING.to_string());
        if !connection_string.starts_with("sqlite:") {
            return Err(Error::Config(format!(
                "store connection string must be a sqlite URL, got '{}'",
                connection_string
            )));
        }

        let client_id = env(ENV_CLIENT_ID)
            .or(toml_config.catalog.client_id)
            .ok_or_else(|| Error::Config(format!("{} is not configured", ENV_CLIENT_ID)))?;
        let client_secret = env(ENV_CLIENT_SECRET)
            .or(toml_config.catalog.client_secret)
            .ok_or_else(|| Error::Config(format!("{} is not configured", ENV_CLIENT_SECRET)))?;

        let search_limit = match env(ENV_SEARCH_LIMIT) {
            Some(raw) => parse_value(ENV_SEARCH_LIMIT, &raw)?,
            None => toml_config.catalog.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        };
        if search_limit == 0 || search_limit > MAX_SEARCH_LIMIT {
            return Err(Error::Config(format!(
                "search limit must be between 1 and {}, got {}",
                MAX_SEARCH_LIMIT, search_limit
            )));
        }

        let related_users = match env(ENV_RELATED_USERS) {
            Some(raw) => raw.parse()?,
            None => toml_config.related_users.unwrap_or_default(),
        };

        Ok(Self {
            server: ServerConfig {
                host,
                port,
                static_dir,
            },
            store: StoreConfig {
                connection_string,
                max_connections: toml_config
                    .store
                    .max_connections
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            },
            catalog: CatalogConfig {
                client_id,
                client_secret,
                token_url: toml_config
                    .catalog
                    .token_url
                    .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
                api_base_url: toml_config
                    .catalog
                    .api_base_url
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                search_limit,
                timeout_secs: toml_config.catalog.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            related_users,
        })
    }

    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has an invalid value: '{}'", name, raw)))
}
