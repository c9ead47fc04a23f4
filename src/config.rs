use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cleanup: CleanupConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CleanupConfig {
    /// Text service receiving the `{ "recipeText": ... }` organize request
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (CLEANUP_ENDPOINT)
    /// 2. Environment variables (LARDER__CLEANUP__ENDPOINT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("cleanup.endpoint", "http://localhost:3000/api/parse-recipe")?
            .set_default("cleanup.timeout_secs", 60)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // optional, ignored if missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LARDER")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(endpoint) = env::var("CLEANUP_ENDPOINT") {
            builder = builder.set_override("cleanup.endpoint", endpoint)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.cleanup.timeout_secs == 0 {
            return Err("Cleanup timeout must be at least 1 second".to_string());
        }
        if !(self.cleanup.endpoint.starts_with("http://")
            || self.cleanup.endpoint.starts_with("https://"))
        {
            return Err(format!(
                "Cleanup endpoint must be an http(s) URL, got '{}'",
                self.cleanup.endpoint
            ));
        }
        Ok(())
    }
}
