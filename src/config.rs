use config::Environment;
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::Result;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives, e.g. `smartsplit=debug`
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allow_any_origin: bool,
    pub max_age: usize,
}

impl Config {
    /// Defaults, overridden by `SMARTSPLIT__SECTION__KEY` variables and by
    /// `SERVICE_PORT` / `RUST_LOG`.
    pub fn from_env() -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", 2)?
            .set_default("log.filter", "info")?
            .set_default("log.json", true)?
            .set_default("cors.allow_any_origin", true)?
            .set_default("cors.max_age", 3600)?;

        builder = builder.add_source(Environment::with_prefix("SMARTSPLIT").separator("__"));

        if let Ok(port) = env::var("SERVICE_PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        if let Ok(filter) = env::var("RUST_LOG") {
            builder = builder.set_override("log.filter", filter)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}
