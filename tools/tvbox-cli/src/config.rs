//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tvbox_commerce::search::PriceRange;
use tvbox_commerce::seo::SiteMeta;
use tvbox_data::{RetryPolicy, TelegramConfig, TimeoutConfig};
use tvbox_observability::LogSettings;

/// File names looked up, in order, in each directory from the cwd upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["tvbox.toml", ".tvbox.toml", "tvbox.json"];

/// Environment variable that overrides `telegram.bot_token`.
pub const TOKEN_ENV: &str = "TVBOX_TELEGRAM_TOKEN";

/// Production catalog API.
pub const DEFAULT_API_URL: &str = "https://svb-shop-back.onrender.com";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Catalog presentation.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Manager notifications.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Public site used for canonical URLs and the sitemap.
    #[serde(default)]
    pub site: SiteMeta,

    /// Log level and format.
    #[serde(default)]
    pub logging: LogSettings,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
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

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_token_override(std::env::var(TOKEN_ENV).ok())
    }

    /// Replace the bot token when `token` is set and not blank.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.telegram.bot_token = Some(token);
        }
        self
    }

    /// Check the configuration, returning errors and warnings separately.
    pub fn check(&self) -> ConfigReport {
        let mut report = ConfigReport::default();

        if !is_http_url(&self.api.base_url) {
            report.errors.push(format!(
                "api.base_url '{}' must be an http(s) URL",
                self.api.base_url
            ));
        }
        if self.api.timeout_secs == 0 {
            report.errors.push("api.timeout_secs must be greater than 0".to_string());
        }
        if self.api.max_retries > 5 {
            report.warnings.push(format!(
                "api.max_retries = {} makes failures slow to surface",
                self.api.max_retries
            ));
        }

        if let (Some(min), Some(max)) = (self.catalog.price_min, self.catalog.price_max) {
            if min > max {
                report.errors.push(format!(
                    "catalog.price_min ({}) is greater than catalog.price_max ({})",
                    min, max
                ));
            }
        }

        if !is_http_url(&self.site.base_url) {
            report.errors.push(format!(
                "site.base_url '{}' must be an http(s) URL",
                self.site.base_url
            ));
        } else if self.site.base_url.ends_with('/') {
            report
                .warnings
                .push("site.base_url should not end with '/'".to_string());
        }
        if self.site.name.trim().is_empty() {
            report.warnings.push("site.name is empty".to_string());
        }

        if !is_http_url(&self.telegram.api_base) {
            report.errors.push(format!(
                "telegram.api_base '{}' must be an http(s) URL",
                self.telegram.api_base
            ));
        }
        if !self.telegram.is_configured() {
            report.warnings.push(format!(
                "telegram needs bot_token (or {}) and chat_ids to submit orders",
                TOKEN_ENV
            ));
        }

        report
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    rest.is_some_and(|host| !host.trim_matches('/').is_empty())
}

/// Outcome of [`CliConfig::check`].
#[derive(Debug, Default)]
pub struct ConfigReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Catalog API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the catalog API.
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Total time allowed for one request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> TimeoutConfig {
        TimeoutConfig::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
    }
}

/// Catalog presentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Product names never listed.
    #[serde(default)]
    pub hidden_products: Vec<String>,

    /// Default lower price bound for `catalog list`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<i64>,

    /// Default upper price bound for `catalog list`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<i64>,

    /// Read products from this JSON file instead of the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl CatalogConfig {
    /// Price range from explicit bounds, falling back to the configured
    /// ones. A bound set nowhere stays open.
    pub fn price_range(&self, min: Option<i64>, max: Option<i64>) -> PriceRange {
        PriceRange::new(
            min.or(self.price_min).unwrap_or(i64::MIN),
            max.or(self.price_max).unwrap_or(i64::MAX),
        )
    }
}

/// Generate a default tvbox.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# TV-box storefront configuration

[api]
base_url = "{api}"
timeout_secs = 20
max_retries = 2

[catalog]
# Product names that are never listed
hidden_products = []
# price_min = 500
# price_max = 30000
# Read products from a JSON snapshot instead of the API
# source_file = "products.json"

[telegram]
api_base = "https://api.telegram.org"
# Prefer the {token_env} environment variable
# bot_token = ""
chat_ids = []

[site]
name = "SVB SHOP - ТВ без подписок"
description = "Smart TV приставки для комфортного просмотра контента"
base_url = "https://tv-bez-podpiski.ru"
sections = ["catalog", "about"]

[logging]
level = "warn"
format = "human"
"#,
        api = DEFAULT_API_URL,
        token_env = TOKEN_ENV,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvbox_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_template_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.site, SiteMeta::default());
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.catalog.hidden_products.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [catalog]
            hidden_products = ["P7"]

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.hidden_products, vec!["P7"]);
        assert_eq!(config.api.timeout_secs, 20);
        assert_eq!(config.api.max_retries, 2);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tvbox.json");

        let mut config = CliConfig::default();
        config.telegram.chat_ids = vec!["973416651".to_string()];
        config.catalog.price_max = Some(15000);
        config.save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.telegram.chat_ids, vec!["973416651"]);
        assert_eq!(loaded.catalog.price_max, Some(15000));
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tvbox.toml");

        let mut config = CliConfig::default();
        config.catalog.hidden_products = vec!["P7".to_string()];
        config.save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.catalog.hidden_products, vec!["P7"]);
        assert_eq!(loaded.telegram.bot_token, None);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tvbox.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_token_override() {
        let config = CliConfig::default().with_token_override(Some("123:abc".to_string()));
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));

        let config = config.with_token_override(Some("  ".to_string()));
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));

        let config = config.with_token_override(None);
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
    }

    #[test]
    fn test_price_range_fallbacks() {
        let catalog = CatalogConfig {
            price_min: Some(500),
            ..CatalogConfig::default()
        };
        let range = catalog.price_range(None, Some(9000));
        assert_eq!(range, PriceRange::new(500, 9000));

        let range = catalog.price_range(Some(1000), None);
        assert_eq!(range, PriceRange::new(1000, i64::MAX));

        assert!(CatalogConfig::default().price_range(None, None).is_unbounded());
    }

    #[test]
    fn test_check_defaults_only_warns_about_telegram() {
        let report = CliConfig::default().check();
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains(TOKEN_ENV));
    }

    #[test]
    fn test_check_reports_errors() {
        let mut config = CliConfig::default();
        config.api.base_url = "svb-shop-back.onrender.com".to_string();
        config.api.timeout_secs = 0;
        config.catalog.price_min = Some(9000);
        config.catalog.price_max = Some(500);
        config.site.base_url = "https://tv-bez-podpiski.ru/".to_string();

        let report = config.check();
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors[0].starts_with("api.base_url"));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("site.base_url")));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_http_url() {
        assert!(is_http_url("https://tv-bez-podpiski.ru"));
        assert!(is_http_url("http://127.0.0.1:8080"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("ftp://example.com"));
    }
}
