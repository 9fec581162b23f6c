use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_api_key: String,
    pub signed_url_ttl_secs: u32,
    pub deck_fetch_limit: u32,
    pub outcome_max_attempts: u32,
    pub outcome_retry_ms: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            backend_url: get_env("BACKEND_URL")?,
            backend_api_key: get_env("BACKEND_API_KEY")?,
            signed_url_ttl_secs: get_env_parse("SIGNED_URL_TTL_SECS", 60)?,
            deck_fetch_limit: get_env_parse("DECK_FETCH_LIMIT", 30)?,
            outcome_max_attempts: get_env_parse("OUTCOME_MAX_ATTEMPTS", 3)?,
            outcome_retry_ms: get_env_parse("OUTCOME_RETRY_MS", 750)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
