//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `WARDEN_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_MAX_SIZE, DEFAULT_CACHE_TTL_SECS, DEFAULT_MIN_CONFIDENCE, DEFAULT_TOP_K,
};
use crate::generator::ProviderKind;

/// Default chat model. With `WARDEN_LLM_MODEL` unset, `from_env` uses the provider's own default.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Default generator provider name.
pub const DEFAULT_LLM_PROVIDER: &str = "mock";

/// Deployment environment. Controls log format and error detail exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    #[inline]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `WARDEN_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    pub environment: Environment,

    /// Passages retrieved per question. Default: `4`.
    pub rag_top_k: usize,

    /// Guard confidence threshold. Default: `0.25`.
    pub rag_min_confidence: f32,

    pub cache_enabled: bool,

    /// Answer cache time-to-live in seconds. Default: `300`.
    pub cache_ttl_secs: u64,

    /// Max answers held by the cache. Default: `1000`.
    pub cache_max_size: usize,

    /// Generator provider: `mock`, `openai` or `anthropic`.
    pub llm_provider: String,

    pub llm_model: String,

    /// JSON file of `{id, text}` passages. Built-in sample policies when unset.
    pub corpus_path: Option<PathBuf>,

    /// Allowed CORS origins. `*` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            environment: Environment::default(),
            rag_top_k: DEFAULT_TOP_K,
            rag_min_confidence: DEFAULT_MIN_CONFIDENCE,
            cache_enabled: true,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_max_size: DEFAULT_CACHE_MAX_SIZE,
            llm_provider: DEFAULT_LLM_PROVIDER.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            corpus_path: None,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "WARDEN_PORT";
    const ENV_BIND_ADDR: &'static str = "WARDEN_BIND_ADDR";
    const ENV_ENVIRONMENT: &'static str = "WARDEN_ENVIRONMENT";
    const ENV_RAG_TOP_K: &'static str = "WARDEN_RAG_TOP_K";
    const ENV_RAG_MIN_CONFIDENCE: &'static str = "WARDEN_RAG_MIN_CONFIDENCE";
    const ENV_CACHE_ENABLED: &'static str = "WARDEN_CACHE_ENABLED";
    const ENV_CACHE_TTL_SECS: &'static str = "WARDEN_CACHE_TTL_SECS";
    const ENV_CACHE_MAX_SIZE: &'static str = "WARDEN_CACHE_MAX_SIZE";
    const ENV_LLM_PROVIDER: &'static str = "WARDEN_LLM_PROVIDER";
    const ENV_LLM_MODEL: &'static str = "WARDEN_LLM_MODEL";
    const ENV_CORPUS_PATH: &'static str = "WARDEN_CORPUS_PATH";
    const ENV_CORS_ORIGINS: &'static str = "WARDEN_CORS_ORIGINS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let environment = match env::var(Self::ENV_ENVIRONMENT) {
            Ok(value) => value.parse()?,
            Err(_) => defaults.environment,
        };

        let llm_provider =
            Self::parse_string_from_env(Self::ENV_LLM_PROVIDER, defaults.llm_provider);
        let provider_model = llm_provider
            .parse::<ProviderKind>()
            .map_or(defaults.llm_model, |kind| kind.default_model().to_string());

        Ok(Self {
            port,
            bind_addr,
            environment,
            rag_top_k: Self::parse_number_from_env(Self::ENV_RAG_TOP_K, defaults.rag_top_k),
            rag_min_confidence: Self::parse_number_from_env(
                Self::ENV_RAG_MIN_CONFIDENCE,
                defaults.rag_min_confidence,
            ),
            cache_enabled: Self::parse_bool_from_env(
                Self::ENV_CACHE_ENABLED,
                defaults.cache_enabled,
            ),
            cache_ttl_secs: Self::parse_number_from_env(
                Self::ENV_CACHE_TTL_SECS,
                defaults.cache_ttl_secs,
            ),
            cache_max_size: Self::parse_number_from_env(
                Self::ENV_CACHE_MAX_SIZE,
                defaults.cache_max_size,
            ),
            llm_provider,
            llm_model: Self::parse_string_from_env(Self::ENV_LLM_MODEL, provider_model),
            corpus_path: Self::parse_optional_path_from_env(Self::ENV_CORPUS_PATH),
            cors_origins: Self::parse_list_from_env(Self::ENV_CORS_ORIGINS, defaults.cors_origins),
        })
    }

    /// Validates ranges, the provider/model pairing and the corpus path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rag_top_k == 0 {
            return Err(ConfigError::InvalidTopK {
                value: self.rag_top_k,
            });
        }

        if !(0.0..=1.0).contains(&self.rag_min_confidence) {
            return Err(ConfigError::InvalidConfidence {
                value: self.rag_min_confidence,
            });
        }

        if self.cache_max_size == 0 {
            return Err(ConfigError::InvalidCacheSize {
                value: self.cache_max_size,
            });
        }

        if let Ok(kind) = self.llm_provider.parse::<ProviderKind>()
            && !kind.serves_model(&self.llm_model)
        {
            return Err(ConfigError::ModelProviderMismatch {
                provider: kind.as_str(),
                model: self.llm_model.clone(),
            });
        }

        if let Some(ref path) = self.corpus_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_number_from_env<T: FromStr>(var_name: &str, default: T) -> T {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        match env::var(var_name)
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            Ok("true" | "1" | "yes" | "on") => true,
            Ok("false" | "0" | "no" | "off") => false,
            _ => default,
        }
    }

    fn parse_list_from_env(var_name: &str, default: Vec<String>) -> Vec<String> {
        let Ok(value) = env::var(var_name) else {
            return default;
        };

        let items: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if items.is_empty() { default } else { items }
    }
}
