//! Runtime configuration, resolved from the environment once at startup.

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:hostel.db";
/// Development fallback, long enough to derive a session key from.
pub const DEFAULT_SECRET_KEY: &str = "insecure-dev-secret-key-0123456789abcdef";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Session cookie signing material. Must be at least 32 bytes.
    pub secret_key: String,
    /// Relaxes cookie security for plain-HTTP development.
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match std::env::var("PORT") {
            Ok(s) => s
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a number between 1 and 65535, got `{s}`"))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let secret_key = match std::env::var("SECRET_KEY") {
            Ok(v) if !v.trim().is_empty() => v,
            _ => DEFAULT_SECRET_KEY.to_string(),
        };
        if secret_key.len() < 32 {
            return Err("SECRET_KEY must be at least 32 bytes".to_string());
        }

        let debug = std::env::var("DEBUG")
            .ok()
            .map(|s| matches!(s.as_str(), "1" | "true" | "TRUE"))
            .unwrap_or(false);

        Ok(Config {
            host,
            port,
            database_url,
            secret_key,
            debug,
        })
    }
}
