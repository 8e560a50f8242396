//! Process configuration from environment variables (a `.env` file is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. `DATABASE_URL` wins over the `DB_*` parts.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let port = var("DB_PORT", "5432");
                port.parse::<u16>().map_err(|_| ConfigError::Invalid {
                    key: "DB_PORT",
                    value: port.clone(),
                })?;
                compose_database_url(
                    &var("DB_USER", "postgres"),
                    &var("DB_PASSWORD", ""),
                    &var("DB_HOST", "127.0.0.1"),
                    &port,
                    &var("DB_NAME", "catalog"),
                )
            }
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value: raw })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_raw = var("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: bind_raw.clone() })?;

        Ok(Settings {
            database_url,
            max_connections,
            bind_addr,
        })
    }
}

fn compose_database_url(user: &str, password: &str, host: &str, port: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{}@{}:{}/{}", user, host, port, name)
    } else {
        format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
    }
}
