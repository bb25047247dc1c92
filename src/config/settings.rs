//! Application settings and configuration
//!
//! Settings are read once at startup from the process environment (after
//! loading a `.env` file if one is present) and validated before the server
//! binds. The provider credential is the only required value.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Default base URL of the Groq OpenAI-compatible API
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model used for every tutoring completion
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

pub const DEFAULT_MAX_TOKENS: u32 = 1024;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!(
                "Invalid environment: {}. Expected: development, staging, or production",
                s
            ),
        }
    }
}

/// Output format of the console log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Json
    }
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => anyhow::bail!("Invalid log format: {}. Expected: json or pretty", s),
        }
    }
}

/// Parameters sent with every completion request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompletionConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Main application settings
#[derive(Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,
    pub log_format: LogFormat,

    // Server settings
    pub host: String,
    pub port: u16,

    // Provider settings
    #[serde(skip_serializing)]
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    /// Client-side timeout; `None` leaves the HTTP client's own behavior in place
    pub provider_timeout_seconds: Option<u64>,

    pub completion: CompletionConfig,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .field("groq_base_url", &self.groq_base_url)
            .field("provider_timeout_seconds", &self.provider_timeout_seconds)
            .field("completion", &self.completion)
            .finish()
    }
}

impl Settings {
    /// Load settings from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup and validate them
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let settings = Self {
            app_name: get("APP_NAME", "maths-tutor-relay"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: get("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: get("LOG_LEVEL", "info"),
            log_format: get("LOG_FORMAT", "json")
                .parse()
                .context("Invalid LOG_FORMAT value")?,

            host: get("HOST", "127.0.0.1"),
            port: get("PORT", "5000")
                .parse()
                .context("Invalid PORT value")?,

            groq_api_key: lookup("GROQ_API_KEY"),
            groq_base_url: get("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            provider_timeout_seconds: lookup("PROVIDER_TIMEOUT_SECONDS")
                .map(|v| v.parse())
                .transpose()
                .context("Invalid PROVIDER_TIMEOUT_SECONDS value")?,

            completion: CompletionConfig {
                model: get("TUTOR_MODEL", DEFAULT_MODEL),
                max_tokens: get("TUTOR_MAX_TOKENS", "1024")
                    .parse()
                    .context("Invalid TUTOR_MAX_TOKENS value")?,
                temperature: get("TUTOR_TEMPERATURE", "0.7")
                    .parse()
                    .context("Invalid TUTOR_TEMPERATURE value")?,
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        self.provider_api_key()?;

        if self.completion.model.trim().is_empty() {
            anyhow::bail!("TUTOR_MODEL cannot be empty");
        }
        if self.completion.max_tokens == 0 {
            anyhow::bail!("TUTOR_MAX_TOKENS must be > 0");
        }
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            anyhow::bail!("TUTOR_TEMPERATURE must be between 0.0 and 2.0");
        }
        if self.provider_timeout_seconds == Some(0) {
            anyhow::bail!("PROVIDER_TIMEOUT_SECONDS must be > 0 when set");
        }

        Ok(())
    }

    /// Valid but questionable combinations, reported once logging is up
    pub fn startup_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.environment == Environment::Production && self.log_format == LogFormat::Pretty {
            warnings.push("Running in production with pretty (non-JSON) logs");
        }
        warnings
    }

    /// The provider credential, rejecting a missing or blank key
    pub fn provider_api_key(&self) -> Result<&str> {
        match self.groq_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => anyhow::bail!("GROQ_API_KEY must be set to a non-empty value"),
        }
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "maths-tutor-relay".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            host: "127.0.0.1".to_string(),
            port: 5000,
            groq_api_key: None,
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            provider_timeout_seconds: None,
            completion: CompletionConfig::default(),
        }
    }
}
