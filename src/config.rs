//! Configuration for nyxo.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (NYXO_API_URL, NYXO_API_TOKEN, NYXO_CATALOG)
//! 2. Config file (.nyxo/config.yaml)
//! 3. Defaults (~/.nyxo/catalog.json, 140-character excerpts, 200 words per minute)
//!
//! Config file discovery:
//! - Searches current directory and parents for .nyxo/config.yaml
//! - Paths in config file are relative to the project root (parent of .nyxo/)
//!
//! The resolved configuration is passed to commands explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::api::{ApiClient, Session};
use crate::content::Locale;
use crate::build::DEFAULT_WORDS_PER_MINUTE;
use crate::richtext::DEFAULT_EXCERPT_LENGTH;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint of the user-content service
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Catalog export (relative to project root)
    pub catalog: Option<String>,
    pub excerpt_length: Option<usize>,
    pub words_per_minute: Option<u32>,
    pub default_locale: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Catalog export path
    pub catalog: PathBuf,
    /// Excerpt length in characters
    pub excerpt_length: usize,
    /// Reading speed used for reading-time estimates
    pub words_per_minute: u32,
    /// Locale used when none is given
    pub default_locale: Locale,
    /// API settings
    pub api: ApiSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_seconds: 30,
        }
    }
}

impl ResolvedConfig {
    /// Session from the configured token, if any
    pub fn session(&self) -> Option<Session> {
        self.api.token.as_ref().map(Session::new)
    }

    /// Build an API client, attaching the session when a token is configured
    pub fn api_client(&self) -> Result<ApiClient> {
        let url = self
            .api
            .url
            .as_ref()
            .context("No API URL configured. Set NYXO_API_URL or api.url in .nyxo/config.yaml")?;

        let client = ApiClient::new(url, Duration::from_secs(self.api.timeout_seconds))
            .context("Failed to build HTTP client")?;

        Ok(match self.session() {
            Some(session) => client.with_session(session),
            None => client,
        })
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".nyxo").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Environment overrides, read once so resolution stays testable
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    api_url: Option<String>,
    api_token: Option<String>,
    catalog: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            api_url: std::env::var("NYXO_API_URL").ok(),
            api_token: std::env::var("NYXO_API_TOKEN").ok(),
            catalog: std::env::var("NYXO_CATALOG").ok(),
        }
    }
}

fn default_catalog() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".nyxo")
        .join("catalog.json"))
}

fn resolve(config_file: Option<PathBuf>, env: EnvOverrides) -> Result<ResolvedConfig> {
    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    // Project root is the parent of .nyxo/
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(Path::new("."));

    let content = file.as_ref().map(|f| f.content.clone()).unwrap_or_default();
    let api = file.as_ref().map(|f| f.api.clone()).unwrap_or_default();

    let catalog = match (env.catalog, content.catalog) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(path)) => resolve_path(base_dir, &path),
        (None, None) => default_catalog()?,
    };

    let default_locale = match content.default_locale {
        Some(code) => code.parse()?,
        None => Locale::default(),
    };

    Ok(ResolvedConfig {
        catalog,
        excerpt_length: content.excerpt_length.unwrap_or(DEFAULT_EXCERPT_LENGTH),
        words_per_minute: content
            .words_per_minute
            .filter(|wpm| *wpm > 0)
            .unwrap_or(DEFAULT_WORDS_PER_MINUTE),
        default_locale,
        api: ApiSettings {
            url: env.api_url.or(api.url),
            token: env.api_token,
            timeout_seconds: api
                .timeout_seconds
                .unwrap_or(ApiSettings::default().timeout_seconds),
        },
        config_file,
    })
}

/// Load configuration from all sources
pub fn load() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve(find_config_file(&cwd), EnvOverrides::from_env())
}
