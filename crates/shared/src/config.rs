//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Exchange rate source configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Provider table configuration.
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Cross-origin resource sharing configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Exchange rate source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Base URL of the Open Exchange Rates API.
    #[serde(default = "default_rates_base_url")]
    pub base_url: String,
    /// Application ID sent as `app_id`.
    #[serde(default)]
    pub api_key: String,
    /// Per-attempt request timeout in seconds.
    #[serde(default = "default_rates_timeout")]
    pub timeout_secs: u64,
    /// Additional attempts after a failed request.
    #[serde(default = "default_rates_retries")]
    pub max_retries: u32,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: default_rates_base_url(),
            api_key: String::new(),
            timeout_secs: default_rates_timeout(),
            max_retries: default_rates_retries(),
        }
    }
}

fn default_rates_base_url() -> String {
    "https://openexchangerates.org/api".to_string()
}

fn default_rates_timeout() -> u64 {
    10
}

fn default_rates_retries() -> u32 {
    1
}

/// Provider table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// Path to the provider CSV file.
    #[serde(default = "default_providers_path")]
    pub path: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            path: default_providers_path(),
        }
    }
}

fn default_providers_path() -> String {
    "data/payment.csv".to_string()
}

/// Cross-origin resource sharing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
        "https://cross-border-payments.vercel.app".to_string(),
    ]
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Log output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// `SENDWISE__*` variables, then the bare `PORT` and `API_KEY` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or no API key is set.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("SENDWISE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;

        if app_config.rates.api_key.is_empty() {
            app_config.rates.api_key = std::env::var("API_KEY").unwrap_or_default();
        }
        if app_config.rates.api_key.is_empty() {
            return Err(config::ConfigError::NotFound("rates.api_key".to_string()));
        }

        Ok(app_config)
    }
}
