//! Application configuration
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Upload directory path
    pub upload_dir: String,
    /// Session expiration in hours
    pub session_expiry_hours: u64,
    /// Maximum upload file size in bytes
    pub max_upload_size: usize,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
    /// Environment (development/production)
    pub environment: Environment,
    /// When set, update/delete on an unknown document id reports NotFound
    /// instead of the default silent no-op.
    pub strict_store: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        };

        let port = match env::var("PORT") {
            Ok(p) => p
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a number, got '{}'", p)))?,
            Err(_) => 8080,
        };

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            upload_dir: env::var("UPLOAD_DIR")
                .or_else(|_| {
                    env::var("DATA_PATH").map(|p| format!("{}/uploads", p.trim_end_matches('/')))
                })
                .unwrap_or_else(|_| "./uploads".to_string()),
            session_expiry_hours: env::var("SESSION_EXPIRY_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(8),
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(50 * 1024 * 1024), // 50MB default
            cors_origins: env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["http://localhost:8080".to_string()]),
            environment,
            strict_store: env::var("STRICT_STORE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: Environment) -> Config {
        Config {
            host: "127.0.0.1".into(),
            port: 9000,
            upload_dir: "./uploads".into(),
            session_expiry_hours: 8,
            max_upload_size: 50 * 1024 * 1024,
            cors_origins: vec!["http://localhost:8080".into()],
            environment,
            strict_store: false,
        }
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        assert_eq!(config(Environment::Development).server_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn production_flag_follows_environment() {
        assert!(!config(Environment::Development).is_production());
        assert!(config(Environment::Production).is_production());
    }
}
