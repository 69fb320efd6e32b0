// src/config.rs
use crate::privacy::ClassifyMode;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration, read once at startup and handed to the
/// components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub scratch_dir: PathBuf,
    pub model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
    pub classify_mode: ClassifyMode,
    pub max_workers: usize,
    pub max_upload_bytes: u64,
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GOOGLE_API_KEY").ok_or(ConfigError::Missing("GOOGLE_API_KEY"))?;

        let model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let model = model
            .strip_prefix("models/")
            .map(str::to_string)
            .unwrap_or(model);

        Ok(Self {
            api_key,
            host: parse_or("HOST", get("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database_path: get("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("apartment.db")),
            scratch_dir: get("AUDIO_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("received_audio")),
            model,
            gemini_base_url: get("GEMINI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(parse_or(
                "GEMINI_TIMEOUT_SECS",
                get("GEMINI_TIMEOUT_SECS"),
                120u64,
            )?),
            classify_mode: parse_or("CLASSIFY_MODE", get("CLASSIFY_MODE"), ClassifyMode::Keyword)?,
            max_workers: parse_or("MAX_WORKERS", get("MAX_WORKERS"), 8usize)?,
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                get("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
