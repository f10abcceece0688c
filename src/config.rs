use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Link preview fetch and extraction settings
    #[serde(default)]
    pub preview: PreviewConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the link previewer
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PreviewConfig {
    /// Hard timeout for the whole fetch (connect, headers, body) in milliseconds
    pub timeout_ms: u64,
    /// Maximum bytes of decoded HTML kept from a response
    pub max_body_bytes: usize,
    /// User-Agent sent with every fetch
    pub user_agent: String,
    /// Titles longer than this many characters are cut
    pub max_title_chars: usize,
    /// Descriptions longer than this many characters are cut
    pub max_description_chars: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_body_bytes: default_max_body_bytes(),
            user_agent: default_user_agent(),
            max_title_chars: default_max_title_chars(),
            max_description_chars: default_max_description_chars(),
        }
    }
}

impl PreviewConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Configuration for the HTTP server
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
    /// Origins allowed by CORS. `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: default_cors_origins(),
        }
    }
}

// Default value functions
fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_body_bytes() -> usize {
    100 * 1024
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; DataVaultBot/1.0)".to_string()
}

fn default_max_title_chars() -> usize {
    200
}

fn default_max_description_chars() -> usize {
    300
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with DATAVAULT__ prefix
    /// 2. datavault.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: DATAVAULT__PREVIEW__TIMEOUT_MS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("datavault").required(false))
        // Use double underscore for nested: DATAVAULT__SERVER__BIND
        .add_source(
            Environment::with_prefix("DATAVAULT")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_timeout_ms(), 10_000);
        assert_eq!(default_max_body_bytes(), 102_400);
        assert_eq!(default_max_title_chars(), 200);
        assert_eq!(default_max_description_chars(), 300);
        assert!(default_user_agent().contains("Bot"));
    }

    #[test]
    fn test_preview_config_default() {
        let preview = PreviewConfig::default();
        assert_eq!(preview.timeout(), Duration::from_secs(10));
        assert_eq!(preview.max_body_bytes, 102_400);
    }

    #[test]
    fn test_server_config_default() {
        let server = ServerConfig::default();
        assert_eq!(server.bind, "127.0.0.1:8787");
        assert_eq!(server.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                "[preview]\ntimeout_ms = 2500\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.preview.timeout_ms, 2500);
        assert_eq!(config.preview.max_title_chars, 200);
        assert_eq!(config.server.bind, "127.0.0.1:8787");
    }

    #[test]
    fn test_empty_sources_use_defaults() {
        // Every key has a default, so a missing file is not an error
        let config: AppConfig = Config::builder()
            .add_source(File::from_str("", config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.preview.timeout_ms, 10_000);
        assert_eq!(config.preview.max_body_bytes, 102_400);
        assert_eq!(config.server.cors_origins, vec!["*".to_string()]);
    }
}
