use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
    /// Series shown in the home page popular strip.
    #[serde(default = "default_popular_count")]
    pub popular_count: usize,
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
    /// Chapters listed on a series page before "show all".
    #[serde(default = "default_chapter_preview")]
    pub chapter_preview: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_lifetime")]
    pub lifetime: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranslationConfig {
    pub const ENGINES: [&'static str; 3] = ["mock", "libre", "disabled"];
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: String::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            pool_size: default_pool_size(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            popular_count: default_popular_count(),
            recent_count: default_recent_count(),
            chapter_preview: default_chapter_preview(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lifetime: default_session_lifetime(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            engine: default_engine(),
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            catalog: CatalogConfig::default(),
            session: SessionConfig::default(),
            translation: TranslationConfig::default(),
        }
    }
}

fn default_title() -> String {
    "Inkshelf".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_path() -> String {
    "./data/inkshelf.db".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_per_page() -> usize {
    24
}

fn default_max_per_page() -> usize {
    100
}

fn default_popular_count() -> usize {
    5
}

fn default_recent_count() -> usize {
    10
}

fn default_chapter_preview() -> usize {
    10
}

fn default_session_lifetime() -> String {
    "30d".to_string()
}

fn default_true() -> bool {
    true
}

fn default_engine() -> String {
    "mock".to_string()
}

fn default_endpoint() -> String {
    "https://libretranslate.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Run `inkshelf init` first?",
                path.display(),
                e
            )
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog.per_page == 0 {
            anyhow::bail!("catalog.per_page must be greater than 0");
        }
        if self.catalog.max_per_page < self.catalog.per_page {
            anyhow::bail!("catalog.max_per_page must be at least catalog.per_page");
        }
        if self.catalog.max_per_page > 500 {
            anyhow::bail!("catalog.max_per_page must be 500 or less");
        }
        if self.database.pool_size == 0 {
            anyhow::bail!("database.pool_size must be greater than 0");
        }
        crate::services::auth::parse_lifetime(&self.session.lifetime)
            .map_err(|e| anyhow::anyhow!("session.lifetime: {}", e))?;

        let engine = self.translation.engine.as_str();
        if !TranslationConfig::ENGINES.contains(&engine) {
            anyhow::bail!(
                "Invalid translation engine '{}'. Available engines: {}",
                engine,
                TranslationConfig::ENGINES.join(", ")
            );
        }
        if engine == "libre" {
            let url = url::Url::parse(&self.translation.endpoint).map_err(|e| {
                anyhow::anyhow!(
                    "translation.endpoint '{}' is not a valid URL: {}",
                    self.translation.endpoint,
                    e
                )
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("translation.endpoint must use http or https");
            }
        }
        if self.translation.timeout_secs == 0 {
            anyhow::bail!("translation.timeout_secs must be greater than 0");
        }
        Ok(())
    }

    /// Config file written by `inkshelf init`.
    pub fn default_toml(title: &str) -> Result<String> {
        let mut config = Config::default();
        config.site.title = title.to_string();
        Ok(toml::to_string_pretty(&config)?)
    }
}
