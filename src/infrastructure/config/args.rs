//! Command-line interface.

use super::app_config::LogLevel;
use crate::domain::entities::SizeTier;
use crate::infrastructure::image::NamingStrategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "strapi-assets",
    version,
    about = "Materialize Strapi images into a static site's public directory",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// CMS origin prepended to image paths.
    #[arg(long, env = "STRAPI_URL", value_name = "URL", global = true)]
    pub strapi_url: Option<String>,

    /// CMS API token.
    #[arg(long, env = "STRAPI_API_TOKEN", hide_env_values = true, global = true)]
    pub strapi_token: Option<String>,

    /// Static site public directory.
    #[arg(long, value_name = "DIR", global = true)]
    pub public_dir: Option<PathBuf>,

    /// Size tier to materialize.
    #[arg(long, value_enum, global = true)]
    pub tier: Option<SizeTier>,

    /// Local filename strategy.
    #[arg(long, value_enum, global = true)]
    pub naming: Option<NamingStrategy>,

    /// HTTP timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub fetch_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// What to materialize.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the site pages and materialize every image they reference.
    Pages,
    /// Materialize a JSON array of image descriptors read from a file.
    Descriptors {
        /// JSON file, `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
