use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "RecovAI Intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_SECRET_KEY: &str = "your-secret-key-here";
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DB_NAME: &str = "sfhacks_db";
const DEFAULT_MONGO_COLLECTION: &str = "patients_data";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;
/// 10 MiB, large enough for a full onboarding form.
const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "recovai_intake=info,tower_http=info"
}

/// Directory for uploaded documents, next to the crate sources.
/// Not configurable through the environment.
pub fn upload_folder() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("uploads")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration, resolved once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub secret_key: String,
    pub mongo_uri: String,
    pub mongo_db_name: String,
    pub mongo_collection: String,
    pub host: IpAddr,
    pub port: u16,
    pub store_timeout: Duration,
    pub body_limit: usize,
    pub upload_folder: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            mongo_db_name: DEFAULT_MONGO_DB_NAME.to_string(),
            mongo_collection: DEFAULT_MONGO_COLLECTION.to_string(),
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            body_limit: DEFAULT_BODY_LIMIT_BYTES,
            upload_folder: upload_folder(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            secret_key: get("SECRET_KEY").unwrap_or(defaults.secret_key),
            mongo_uri: get("MONGO_URI").unwrap_or(defaults.mongo_uri),
            mongo_db_name: get("MONGO_DB_NAME").unwrap_or(defaults.mongo_db_name),
            mongo_collection: get("MONGO_COLLECTION").unwrap_or(defaults.mongo_collection),
            host: parse_var("HOST", get("HOST"))?.unwrap_or(defaults.host),
            port: parse_var("PORT", get("PORT"))?.unwrap_or(defaults.port),
            store_timeout: parse_var::<u64>("STORE_TIMEOUT_MS", get("STORE_TIMEOUT_MS"))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.store_timeout),
            body_limit: parse_var("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"))?
                .unwrap_or(defaults.body_limit),
            upload_folder: defaults.upload_folder,
        })
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(var: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.map(|value| {
        value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
            value,
        })
    })
    .transpose()
}

/// Strip `user:password@` from a connection string for logging.
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end + 3..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***@{}", &uri[..scheme_end], &rest[at + 1..]),
        None => uri.to_string(),
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("secret_key", &"<redacted>")
            .field("mongo_uri", &redact_uri(&self.mongo_uri))
            .field("mongo_db_name", &self.mongo_db_name)
            .field("mongo_collection", &self.mongo_collection)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("store_timeout", &self.store_timeout)
            .field("body_limit", &self.body_limit)
            .field("upload_folder", &self.upload_folder)
            .finish()
    }
}
