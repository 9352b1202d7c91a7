/// Configuration management for Gallery Service
///
/// Loads configuration from environment variables.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Feed pagination settings
    pub feed: FeedConfig,
    /// Search result caps
    pub search: SearchConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub http_port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, "*" for any
    pub allowed_origins: String,
}

/// Feed pagination configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Page size when the client does not send one
    pub default_limit: u32,
    /// Hard ceiling on page size
    pub max_limit: u32,
}

/// Search result caps per category
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchConfig {
    pub post_cap: usize,
    pub user_cap: usize,
    pub tag_cap: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            post_cap: 20,
            user_cap: 20,
            tag_cap: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
        };

        let cors = CorsConfig {
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        };

        let feed = FeedConfig {
            default_limit: parse_env("FEED_DEFAULT_LIMIT", 20)?,
            max_limit: parse_env("FEED_MAX_LIMIT", 100)?,
        };

        let search = SearchConfig {
            post_cap: parse_env("SEARCH_POST_CAP", 20)?,
            user_cap: parse_env("SEARCH_USER_CAP", 20)?,
            tag_cap: parse_env("SEARCH_TAG_CAP", 10)?,
        };

        Ok(Config {
            app,
            cors,
            feed,
            search,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        Err(_) => Ok(default),
    }
}
