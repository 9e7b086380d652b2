//! Configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    ImageStoreConfig, JwtConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
};
