use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CLUSTER: &str = "cluster0.ysjwzre.mongodb.net";
const DEFAULT_DATABASE: &str = "plateshareDB";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
    #[error("MONGODB_URI or DB_USER/DB_PASS must be set")]
    MissingCredentials,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_name: String,
    mongodb_uri: Option<String>,
}

impl AppConfig {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let mongodb_uri = lookup("MONGODB_URI").or_else(|| {
            let user = lookup("DB_USER")?;
            let pass = lookup("DB_PASS")?;
            let cluster = lookup("MONGODB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
            Some(format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                urlencoding::encode(&user),
                urlencoding::encode(&pass),
                cluster
            ))
        });

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            mongodb_uri,
        })
    }

    pub fn mongodb_uri(&self) -> Result<&str, ConfigError> {
        self.mongodb_uri.as_deref().ok_or(ConfigError::MissingCredentials)
    }
}
