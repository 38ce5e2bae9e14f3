//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use reparto_app::AppSession;
use reparto_data::{FetchClient, HttpMarketplaceApi, MarketplaceApi};

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["reparto.toml", ".reparto.toml", "reparto.json"];

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    /// File the config was read from, or where it will be written.
    pub config_path: PathBuf,
    pub output: Output,
    api: Arc<HttpMarketplaceApi>,
}

impl Context {
    /// Load config and build the API client.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                let config = if path.exists() {
                    CliConfig::load(&path)?
                } else {
                    CliConfig::default()
                };
                (config, path)
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, path),
                None => (CliConfig::default(), cwd.join(CONFIG_NAMES[0])),
            },
        };

        let api = Arc::new(build_api(&config)?);
        tracing::debug!(config = %config_path.display(), base_url = %config.api.base_url, "context loaded");

        Ok(Self {
            config,
            config_path,
            output,
            api,
        })
    }

    pub fn api(&self) -> Arc<HttpMarketplaceApi> {
        self.api.clone()
    }

    /// A fresh session: one cart, shared by every view built from it.
    pub fn session(&self) -> Result<AppSession> {
        let api: Arc<dyn MarketplaceApi> = self.api.clone();
        Ok(AppSession::new(api, self.config.currency()?).with_poll_interval(self.config.poll.interval()))
    }

    /// Persist the current bearer token, or forget it after a logout.
    pub fn save_token(&mut self) -> Result<()> {
        self.config.api.token = self.api.token();
        self.config.save(&self.config_path)
    }
}

fn build_api(config: &CliConfig) -> Result<HttpMarketplaceApi> {
    let client = FetchClient::new(config.api.client_config())
        .context("Failed to build HTTP client")?
        .with_base_url(config.api.base_url.clone());

    let api = HttpMarketplaceApi::new(client);
    Ok(match &config.api.token {
        Some(token) => api.with_token(token.clone()),
        None => api,
    })
}

/// Walk up from `start` looking for a config file.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".reparto.toml"), "").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(".reparto.toml"));
    }

    #[test]
    fn test_saved_token_is_reused() {
        let mut config = CliConfig::default();
        config.api.token = Some("tok".to_string());
        let api = build_api(&config).unwrap();
        assert_eq!(api.token().as_deref(), Some("tok"));
    }
}
