//! Application configuration.

pub mod app_config;
pub mod args;
pub mod loader;

pub use app_config::{AppConfig, DEFAULT_STRAPI_URL, LogLevel};
pub use args::{CliArgs, Command};
pub use loader::{ConfigError, ConfigLoader};
