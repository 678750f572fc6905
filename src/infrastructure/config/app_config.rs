//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::args::CliArgs;
use crate::domain::entities::SizeTier;
use crate::infrastructure::image::{MaterializerConfig, NamingStrategy};

const APP_NAME: &str = "strapi-assets";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// CMS origin used when none is configured.
pub const DEFAULT_STRAPI_URL: &str = "http://localhost:1337";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from the config file and overridden by
/// CLI arguments and environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// CMS origin, e.g. `http://localhost:1337`.
    #[serde(default)]
    pub strapi_url: Option<String>,

    /// CMS API token for non-public content.
    #[serde(default)]
    pub strapi_token: Option<String>,

    /// Static site public directory; images land in its `optimized-images`.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Size tier used when none is requested. Unknown names fall back to
    /// medium instead of rejecting the file.
    #[serde(default, deserialize_with = "deserialize_tier_lenient")]
    pub tier: SizeTier,

    /// Local filename derivation.
    #[serde(default)]
    pub naming: NamingStrategy,

    /// Timeout for every HTTP request, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

const fn default_fetch_timeout_secs() -> u64 {
    30
}

fn deserialize_tier_lenient<'de, D>(deserializer: D) -> Result<SizeTier, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let tier = SizeTier::parse_lenient(&raw);
    if raw.parse::<SizeTier>().is_err() {
        warn!(tier = %raw, fallback = %tier, "Unknown size tier in config");
    }
    Ok(tier)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            strapi_url: None,
            strapi_token: None,
            public_dir: default_public_dir(),
            tier: SizeTier::default(),
            naming: NamingStrategy::default(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(url) = &args.strapi_url {
            self.strapi_url = Some(url.clone());
        }
        if let Some(token) = &args.strapi_token {
            self.strapi_token = Some(token.clone());
        }
        if let Some(public_dir) = &args.public_dir {
            self.public_dir = public_dir.clone();
        }
        if let Some(tier) = args.tier {
            self.tier = tier;
        }
        if let Some(naming) = args.naming {
            self.naming = naming;
        }
        if let Some(timeout) = args.fetch_timeout {
            self.fetch_timeout_secs = timeout;
        }
    }

    /// Returns the CMS origin, falling back to [`DEFAULT_STRAPI_URL`].
    #[must_use]
    pub fn effective_strapi_url(&self) -> &str {
        self.strapi_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STRAPI_URL)
    }

    /// Returns the HTTP timeout.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Builds the materializer configuration.
    #[must_use]
    pub fn materializer_config(&self) -> MaterializerConfig {
        MaterializerConfig::new(self.effective_strapi_url(), &self.public_dir)
            .with_naming(self.naming)
            .with_fetch_timeout(self.fetch_timeout())
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            strapi_url = "https://cms.example.com"
            public_dir = "site/public"
            tier = "large"
            naming = "hashed"
            fetch_timeout_secs = 5
            log_level = "debug"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.effective_strapi_url(), "https://cms.example.com");
        assert_eq!(config.public_dir, PathBuf::from("site/public"));
        assert_eq!(config.tier, SizeTier::Large);
        assert_eq!(config.naming, NamingStrategy::Hashed);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_unknown_tier_keeps_rest_of_file() {
        let toml_content = r#"
            strapi_url = "https://cms.prod"
            public_dir = "dist"
            tier = "huge"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.strapi_url.as_deref(), Some("https://cms.prod"));
        assert_eq!(config.public_dir, PathBuf::from("dist"));
        assert_eq!(config.tier, SizeTier::Medium);
    }

    #[test]
    fn test_tier_is_case_insensitive() {
        let config: AppConfig = toml::from_str("tier = \"LARGE\"").unwrap();
        assert_eq!(config.tier, SizeTier::Large);
    }

    #[test]
    fn test_default_config() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.effective_strapi_url(), DEFAULT_STRAPI_URL);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.tier, SizeTier::Medium);
        assert_eq!(config.naming, NamingStrategy::Legacy);
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_blank_url_uses_default() {
        let config = AppConfig {
            strapi_url: Some("   ".into()),
            ..AppConfig::default()
        };
        assert_eq!(config.effective_strapi_url(), DEFAULT_STRAPI_URL);
    }

    #[test]
    fn test_args_override_file() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "strapi-assets",
            "--strapi-url",
            "http://cms:1337",
            "--public-dir",
            "dist",
            "--tier",
            "thumbnail",
            "--fetch-timeout",
            "3",
            "pages",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.effective_strapi_url(), "http://cms:1337");
        assert_eq!(config.tier, SizeTier::Thumbnail);
        assert_eq!(config.fetch_timeout_secs, 3);
        assert_eq!(config.naming, NamingStrategy::Legacy);
    }

    #[test]
    fn test_materializer_config() {
        let config = AppConfig {
            strapi_url: Some("http://cms:1337".into()),
            public_dir: PathBuf::from("dist"),
            naming: NamingStrategy::Hashed,
            ..AppConfig::default()
        };

        let materializer = config.materializer_config();

        assert_eq!(materializer.origin, "http://cms:1337");
        assert_eq!(materializer.output_dir, PathBuf::from("dist/optimized-images"));
        assert_eq!(materializer.public_prefix, "/optimized-images");
        assert_eq!(materializer.naming, NamingStrategy::Hashed);
    }
}
