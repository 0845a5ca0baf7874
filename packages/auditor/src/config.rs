use std::str::FromStr;

use crate::error::{AuditError, Result};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_FRED_BASE_URL: &str = "https://api.stlouisfed.org";
pub const DEFAULT_EIA_BASE_URL: &str = "https://api.eia.gov";
pub const DEFAULT_WORLD_BANK_BASE_URL: &str = "https://api.worldbank.org";
pub const DEFAULT_NOAA_BASE_URL: &str = "https://www.ncei.noaa.gov";

/// Top-level configuration for the audit service.
#[derive(Debug, Clone)]
pub struct AuditorConfig {
    pub llm: LlmConfig,
    pub gateway: GatewayConfig,
    pub fetcher: FetcherConfig,
    pub bind_addr: String,
}

impl AuditorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("AUDITOR_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());

        Ok(Self {
            llm: LlmConfig::from_env()?,
            gateway: GatewayConfig::from_env(),
            fetcher: FetcherConfig::from_env(),
            bind_addr,
        })
    }
}

/// Configuration for the generative model client.
///
/// NOTE: Debug is implemented manually so the API key never reaches logs.
#[derive(Clone)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: String,
    pub temperature: f64,
    pub api_base_url: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("api_base_url", &self.api_base_url)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AuditError::Config("ANTHROPIC_API_KEY not set".into()))?;

        Ok(Self {
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            api_key,
            temperature: env_parse("LLM_TEMPERATURE", 0.1),
            api_base_url: std::env::var("LLM_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.into()),
            max_tokens: env_parse("LLM_MAX_TOKENS", 4096),
            timeout_secs: env_parse("LLM_TIMEOUT_SECS", 60),
        })
    }

    /// Create a config builder for testing.
    pub fn builder(api_key: impl Into<String>) -> LlmConfigBuilder {
        LlmConfigBuilder {
            config: LlmConfig {
                model: DEFAULT_MODEL.into(),
                api_key: api_key.into(),
                temperature: 0.1,
                api_base_url: DEFAULT_LLM_BASE_URL.into(),
                max_tokens: 4096,
                timeout_secs: 60,
            },
        }
    }
}

/// Builder for constructing `LlmConfig` in tests.
pub struct LlmConfigBuilder {
    config: LlmConfig,
}

impl LlmConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = temperature;
        self
    }

    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.config.api_base_url = api_base_url.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> LlmConfig {
        self.config
    }
}

/// Credentials and endpoints for the reference data providers.
///
/// A missing key disables that provider; it is not a startup error.
#[derive(Clone)]
pub struct GatewayConfig {
    pub fred_api_key: Option<String>,
    pub eia_api_key: Option<String>,
    pub fred_base_url: String,
    pub eia_base_url: String,
    pub world_bank_base_url: String,
    pub noaa_base_url: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("fred_enabled", &self.fred_api_key.is_some())
            .field("eia_enabled", &self.eia_api_key.is_some())
            .field("fred_base_url", &self.fred_base_url)
            .field("eia_base_url", &self.eia_base_url)
            .field("world_bank_base_url", &self.world_bank_base_url)
            .field("noaa_base_url", &self.noaa_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let config = Self {
            fred_api_key: env_optional("FRED_API_KEY"),
            eia_api_key: env_optional("EIA_API_KEY"),
            fred_base_url: std::env::var("FRED_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FRED_BASE_URL.into()),
            eia_base_url: std::env::var("EIA_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_EIA_BASE_URL.into()),
            world_bank_base_url: std::env::var("WORLD_BANK_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_WORLD_BANK_BASE_URL.into()),
            noaa_base_url: std::env::var("NOAA_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NOAA_BASE_URL.into()),
            timeout_secs: env_parse("GATEWAY_TIMEOUT_SECS", 5),
        };

        if config.fred_api_key.is_none() {
            tracing::info!("FRED_API_KEY not set, FRED lookups disabled");
        }
        if config.eia_api_key.is_none() {
            tracing::info!("EIA_API_KEY not set, EIA lookups disabled");
        }

        config
    }

    /// Create a config builder for testing. All providers start disabled or
    /// pointed at their public endpoints.
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder {
            config: GatewayConfig {
                fred_api_key: None,
                eia_api_key: None,
                fred_base_url: DEFAULT_FRED_BASE_URL.into(),
                eia_base_url: DEFAULT_EIA_BASE_URL.into(),
                world_bank_base_url: DEFAULT_WORLD_BANK_BASE_URL.into(),
                noaa_base_url: DEFAULT_NOAA_BASE_URL.into(),
                timeout_secs: 5,
            },
        }
    }
}

/// Builder for constructing `GatewayConfig` in tests.
pub struct GatewayConfigBuilder {
    config: GatewayConfig,
}

impl GatewayConfigBuilder {
    pub fn fred_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.fred_api_key = Some(key.into());
        self
    }

    pub fn eia_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.eia_api_key = Some(key.into());
        self
    }

    /// Point every provider at the same base URL (a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.config.fred_base_url = base_url.clone();
        self.config.eia_base_url = base_url.clone();
        self.config.world_bank_base_url = base_url.clone();
        self.config.noaa_base_url = base_url;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> GatewayConfig {
        self.config
    }
}

/// Settings for the text acquisition collaborator.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub proxy_base_url: String,
    pub timeout_secs: u64,
}

impl FetcherConfig {
    pub fn from_env() -> Self {
        Self {
            proxy_base_url: std::env::var("SCRAPER_PROXY_URL").unwrap_or_else(|_| {
                logic_auditor_fetcher::config::DEFAULT_PROXY_BASE_URL.into()
            }),
            timeout_secs: env_parse(
                "SCRAPER_TIMEOUT_SECS",
                logic_auditor_fetcher::config::HTTP_TIMEOUT_SECS,
            ),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            proxy_base_url: logic_auditor_fetcher::config::DEFAULT_PROXY_BASE_URL.into(),
            timeout_secs: logic_auditor_fetcher::config::HTTP_TIMEOUT_SECS,
        }
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Empty values count as unset.
fn env_optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
