//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable holding the text generation credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Image labeling settings
    #[serde(default)]
    pub vision: VisionConfig,

    /// Text generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Upload event filtering
    #[serde(default)]
    pub events: EventConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override settings from process environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Override settings from a variable lookup.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("MAX_LABELS") {
            match value.parse() {
                Ok(n) => self.vision.max_labels = n,
                Err(_) => log::warn!("Ignoring invalid MAX_LABELS: {}", value),
            }
        }

        if let Some(value) = lookup("MIN_CONFIDENCE") {
            match value.parse() {
                Ok(c) => self.vision.min_confidence = c,
                Err(_) => log::warn!("Ignoring invalid MIN_CONFIDENCE: {}", value),
            }
        }

        if let Some(model) = lookup("OPENAI_MODEL") {
            self.generation.model = model;
        }

        if let Some(endpoint) = lookup("OPENAI_ENDPOINT") {
            self.generation.endpoint = endpoint;
        }

        if let Some(value) = lookup("GENERATION_TIMEOUT_SECS") {
            match value.parse() {
                Ok(secs) => self.generation.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid GENERATION_TIMEOUT_SECS: {}", value),
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.vision.max_labels == 0 {
            return Err(AppError::validation("vision.max_labels must be > 0"));
        }
        if !(0.0..=100.0).contains(&self.vision.min_confidence) {
            return Err(AppError::validation(
                "vision.min_confidence must be within 0..=100",
            ));
        }
        if self.generation.model.trim().is_empty() {
            return Err(AppError::validation("generation.model is empty"));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(AppError::validation(
                "generation.temperature must be within 0..=2",
            ));
        }
        if self.generation.max_tokens == 0 {
            return Err(AppError::validation("generation.max_tokens must be > 0"));
        }
        if self.generation.timeout_secs == 0 {
            return Err(AppError::validation("generation.timeout_secs must be > 0"));
        }

        let endpoint = Url::parse(&self.generation.endpoint).map_err(|e| {
            AppError::validation(format!(
                "generation.endpoint '{}' is not a valid URL: {}",
                self.generation.endpoint, e
            ))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(AppError::validation(
                "generation.endpoint must use http or https",
            ));
        }

        if self.events.image_extensions.is_empty() {
            return Err(AppError::validation("No image extensions defined"));
        }
        Ok(())
    }
}

/// Image labeling request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Maximum labels requested per image
    #[serde(default = "defaults::max_labels")]
    pub max_labels: usize,

    /// Minimum confidence (percent) for a label to be kept
    #[serde(default = "defaults::min_confidence")]
    pub min_confidence: f32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            max_labels: defaults::max_labels(),
            min_confidence: defaults::min_confidence(),
        }
    }
}

/// Chat completion request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Chat completion endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Model identifier sent with each request
    #[serde(default = "defaults::model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "defaults::temperature")]
    pub temperature: f32,

    /// Completion length limit in tokens
    #[serde(default = "defaults::max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            model: defaults::model(),
            temperature: defaults::temperature(),
            max_tokens: defaults::max_tokens(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Upload event filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    /// Accepted file extensions, without the leading dot
    #[serde(default = "defaults::image_extensions")]
    pub image_extensions: Vec<String>,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            image_extensions: defaults::image_extensions(),
        }
    }
}

/// Bearer credential for the text generation service.
///
/// Read once at startup and handed to the client; never looked up mid-call.
#[derive(Clone, Default)]
pub struct ApiKey(Option<String>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(key))
        }
    }

    /// Read the key from [`API_KEY_ENV`].
    pub fn from_env() -> Self {
        match std::env::var(API_KEY_ENV) {
            Ok(key) => Self::new(key),
            Err(_) => {
                log::warn!(
                    "{} is not set; article generation requests will be rejected",
                    API_KEY_ENV
                );
                Self(None)
            }
        }
    }

    pub fn expose(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("ApiKey(<redacted>)"),
            None => f.write_str("ApiKey(<missing>)"),
        }
    }
}

mod defaults {
    // Vision defaults
    pub fn max_labels() -> usize {
        10
    }
    pub fn min_confidence() -> f32 {
        80.0
    }

    // Generation defaults
    pub fn endpoint() -> String {
        "https://api.openai.com/v1/chat/completions".into()
    }
    pub fn model() -> String {
        "gpt-4".into()
    }
    pub fn temperature() -> f32 {
        0.7
    }
    pub fn max_tokens() -> u32 {
        800
    }
    pub fn timeout() -> u64 {
        60
    }
    pub fn user_agent() -> String {
        concat!("label-writer/", env!("CARGO_PKG_VERSION")).into()
    }

    // Event defaults
    pub fn image_extensions() -> Vec<String> {
        vec!["jpg".into(), "jpeg".into(), "png".into()]
    }
}
