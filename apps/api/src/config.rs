use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default, so an empty environment starts a local instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_host: String,
    pub redis_port: u16,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_host: env_or("REDIS_HOST", "localhost"),
            redis_port: parse_port("REDIS_PORT", std::env::var("REDIS_PORT").ok(), 6379)?,
            host: env_or("HOST", "0.0.0.0"),
            port: parse_port("PORT", std::env::var("PORT").ok(), 5000)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Connection URL handed to the Redis client.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_port(key: &str, raw: Option<String>, default: u16) -> Result<u16> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .with_context(|| format!("{key} must be a valid port number, got '{value}'")),
    }
}
