//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reparto_commerce::money::Currency;
use reparto_data::ClientConfig;
use serde::{Deserialize, Serialize};

/// Contents of `reparto.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// ISO code prices are shown in.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a TOML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn currency(&self) -> Result<Currency> {
        match Currency::from_code(&self.currency) {
            Some(c) => Ok(c),
            None => bail!("Unknown currency '{}'", self.currency),
        }
    }

    /// Look up a value by dot-separated key, e.g. `api.base_url`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "api.base_url" => self.api.base_url.clone(),
            "api.connect_timeout_secs" => self.api.connect_timeout_secs.to_string(),
            "api.request_timeout_secs" => self.api.request_timeout_secs.to_string(),
            "api.token" => self.api.token.as_ref().map(|_| "<set>".to_string())?,
            "poll.interval_secs" => self.poll.interval_secs.to_string(),
            "log.level" => self.log.level.clone(),
            "log.json" => self.log.json.to_string(),
            "currency" => self.currency.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a value by dot-separated key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => self.api.base_url = value.to_string(),
            "api.connect_timeout_secs" => self.api.connect_timeout_secs = parse(key, value)?,
            "api.request_timeout_secs" => self.api.request_timeout_secs = parse(key, value)?,
            "api.token" => {
                self.api.token = Some(value.to_string()).filter(|t| !t.is_empty());
            }
            "poll.interval_secs" => self.poll.interval_secs = parse(key, value)?,
            "log.level" => self.log.level = value.to_string(),
            "log.json" => self.log.json = parse(key, value)?,
            "currency" => {
                if Currency::from_code(value).is_none() {
                    bail!("Unknown currency '{}'", value);
                }
                self.currency = value.to_uppercase();
            }
            _ => bail!("Unknown config key '{}'", key),
        }
        Ok(())
    }

    /// Problems that would make API calls fail.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            problems.push(format!("api.base_url is not an http(s) URL: {}", self.api.base_url));
        }
        if self.poll.interval_secs == 0 {
            problems.push("poll.interval_secs must be at least 1".to_string());
        }
        if self.api.connect_timeout_secs == 0 {
            problems.push("api.connect_timeout_secs must be at least 1".to_string());
        }
        if self.api.request_timeout_secs == 0 {
            problems.push("api.request_timeout_secs must be at least 1".to_string());
        }
        if Currency::from_code(&self.currency).is_none() {
            problems.push(format!("currency is not supported: {}", self.currency));
        }
        problems
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", key, value))
}

fn default_currency() -> String {
    "MXN".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            api: ApiConfig::default(),
            poll: PollConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Where and how to reach the marketplace API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Bearer token saved by `reparto login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientConfig::default()
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    20
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between refreshes of watched lists.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

fn default_interval() -> u64 {
    15
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Starter `reparto.toml`.
pub fn generate_default_config() -> String {
    r#"# Reparto client configuration

currency = "MXN"

[api]
base_url = "http://localhost:3000/api"
connect_timeout_secs = 5
request_timeout_secs = 20
# token is written here by `reparto login`

[poll]
interval_secs = 15

[log]
level = "warn"
json = false
"#
    .to_string()
}
