//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use tvbox_commerce::catalog::{hide_products, Product};
use tvbox_data::{CatalogSource, FileCatalog, HttpCatalog, TelegramRelay};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config: config.with_env_overrides(),
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }

    /// Catalog to read from: `file` if given, else the configured snapshot,
    /// else the remote API.
    pub fn catalog_source(&self, file: Option<&str>) -> Result<Box<dyn CatalogSource>> {
        if let Some(path) = file.or(self.config.catalog.source_file.as_deref()) {
            let path = self.resolve_path(path);
            self.output
                .debug(&format!("Reading catalog from {}", path.display()));
            return Ok(Box::new(FileCatalog::new(path)));
        }

        self.output
            .debug(&format!("Reading catalog from {}", self.config.api.base_url));
        Ok(Box::new(self.http_catalog()?))
    }

    /// Client for the remote catalog API.
    pub fn http_catalog(&self) -> Result<HttpCatalog> {
        let api = &self.config.api;
        HttpCatalog::new(&api.base_url, api.timeout(), api.retry_policy())
            .with_context(|| format!("Invalid api.base_url: {}", api.base_url))
    }

    /// Every listed product, with hidden ones removed.
    pub async fn load_products(&self, file: Option<&str>) -> Result<Vec<Product>> {
        let source = self.catalog_source(file)?;
        let spinner = self.output.spinner("Loading catalog...");
        let result = source.list_products().await;
        spinner.finish_and_clear();

        let products = result.context("Failed to load catalog")?;
        Ok(hide_products(products, &self.config.catalog.hidden_products))
    }

    /// Relay to the manager chats. Fails when Telegram is not configured.
    pub fn telegram_relay(&self) -> Result<TelegramRelay> {
        if !self.config.telegram.is_configured() {
            bail!(
                "Telegram is not configured. Set telegram.bot_token (or {}) and telegram.chat_ids.",
                crate::config::TOKEN_ENV
            );
        }
        TelegramRelay::new(self.config.telegram.clone(), self.config.api.timeout())
            .context("Failed to create Telegram client")
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".tvbox.toml"), "").unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(".tvbox.toml"));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("tvbox.toml"), "").unwrap();
        std::fs::write(nested.join("tvbox.json"), "{}").unwrap();

        assert_eq!(find_config_file(&nested).unwrap(), nested.join("tvbox.json"));
    }

    #[test]
    fn test_find_config_prefers_toml_in_same_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tvbox.json"), "{}").unwrap();
        std::fs::write(dir.path().join("tvbox.toml"), "").unwrap();

        assert_eq!(
            find_config_file(dir.path()).unwrap(),
            dir.path().join("tvbox.toml")
        );
    }

    #[test]
    fn test_resolve() {
        let cwd = Path::new("/srv/shop");
        assert_eq!(resolve(cwd, "products.json"), cwd.join("products.json"));
        assert_eq!(resolve(cwd, "/tmp/p.json"), PathBuf::from("/tmp/p.json"));
    }
}
