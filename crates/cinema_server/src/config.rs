//! Server configuration loaded from TOML.

use cinema_error::ConfigError;
use cinema_script::DEFAULT_MOVIES;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the Cinema webhook server.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// # Example TOML
///
/// ```toml
/// port = 8080
/// base_url = "https://cinema.example.com"
/// movies_dir = "./movies"
/// api_base = "https://api.hipchat.com"
/// bot_name = "Hipchat Cinema"
/// allowed_movies = ["hackers", "the_holy_grail"]
/// delay_scale = 1.0
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    #[builder(default = "default_port()")]
    #[serde(default = "default_port")]
    port: u16,

    /// Public URL the add-on is reachable at
    #[builder(default)]
    #[serde(default)]
    base_url: String,

    /// Directory with one folder per movie
    #[builder(default = "default_movies_dir()")]
    #[serde(default = "default_movies_dir")]
    movies_dir: PathBuf,

    /// Chat service API root
    #[builder(default = "default_api_base()")]
    #[serde(default = "default_api_base")]
    api_base: String,

    /// Sender name on bot replies
    #[builder(default = "default_bot_name()")]
    #[serde(default = "default_bot_name")]
    bot_name: String,

    /// Movie identifiers users may play
    #[builder(default = "default_allowed_movies()")]
    #[serde(default = "default_allowed_movies")]
    allowed_movies: Vec<String>,

    /// Multiplier on every line delay
    #[builder(default = "1.0")]
    #[serde(default = "default_delay_scale")]
    delay_scale: f64,
}

fn default_port() -> u16 {
    8080
}

fn default_movies_dir() -> PathBuf {
    PathBuf::from("./movies")
}

fn default_api_base() -> String {
    "https://api.hipchat.com".to_string()
}

fn default_bot_name() -> String {
    "Hipchat Cinema".to_string()
}

fn default_allowed_movies() -> Vec<String> {
    DEFAULT_MOVIES.iter().map(|m| m.to_string()).collect()
}

fn default_delay_scale() -> f64 {
    1.0
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            base_url: String::new(),
            movies_dir: default_movies_dir(),
            api_base: default_api_base(),
            bot_name: default_bot_name(),
            allowed_movies: default_allowed_movies(),
            delay_scale: default_delay_scale(),
        }
    }
}

impl ServerConfig {
    /// Start building a configuration from defaults.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid TOML, or fails
    /// [`ServerConfig::validate`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the server unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_movies.is_empty() {
            return Err(ConfigError::new("allowed_movies cannot be empty"));
        }
        if let Some(bad) = self
            .allowed_movies
            .iter()
            .find(|m| m.is_empty() || m.contains(['/', '\\', '.']))
        {
            return Err(ConfigError::new(format!(
                "Invalid movie identifier '{}': must be a plain folder name",
                bad
            )));
        }
        if !(self.delay_scale.is_finite() && self.delay_scale >= 0.0) {
            return Err(ConfigError::new(format!(
                "delay_scale must be a non-negative number, got {}",
                self.delay_scale
            )));
        }
        Ok(())
    }

    /// Override the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the public base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the movies directory.
    pub fn with_movies_dir(mut self, movies_dir: impl Into<PathBuf>) -> Self {
        self.movies_dir = movies_dir.into();
        self
    }
}
