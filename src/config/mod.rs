use std::env;
use std::net::SocketAddr;

use thiserror::Error;

use crate::db::SeedOptions;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/escoteiros";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_JWT_SECRET: &str = "fallback_secret_for_development_only";

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@escoteiros.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Administrador";
pub const DEFAULT_LOCATION: &str = "Sede do Grupo Escoteiro Pirabeiraba";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Account created on first boot and by the admin reset endpoint.
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub admin_secret_password: String,
    pub default_admin: DefaultAdmin,
    pub default_location: String,
    pub seed_sample_events: bool,
    /// `RUST_ENV=production`: secure cookies and HSTS.
    pub production: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let production = get("RUST_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if production => return Err(ConfigError::Missing("JWT_SECRET")),
            None => {
                tracing::warn!("JWT_SECRET is not set, using the development fallback secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let admin_secret_password =
            get("ADMIN_SECRET_PASSWORD").ok_or(ConfigError::Missing("ADMIN_SECRET_PASSWORD"))?;

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: raw,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let seed_sample_events = match get("SEED_SAMPLE_EVENTS") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                name: "SEED_SAMPLE_EVENTS",
                value: raw,
            })?,
            None => false,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| {
                cors::DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|o| o.to_string())
                    .collect()
            });

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            db_max_connections,
            bind_addr,
            jwt_secret,
            admin_secret_password,
            default_admin: DefaultAdmin {
                email: get("DEFAULT_ADMIN_EMAIL")
                    .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
                password: get("DEFAULT_ADMIN_PASSWORD")
                    .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
                name: get("DEFAULT_ADMIN_NAME").unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string()),
            },
            default_location: get("DEFAULT_LOCATION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            seed_sample_events,
            production,
            cors_allowed_origins,
        })
    }

    pub fn seed_options(&self) -> SeedOptions {
        SeedOptions {
            admin: self.default_admin.clone(),
            default_location: self.default_location.clone(),
            sample_events: self.seed_sample_events,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
