//! Application configuration.
//!
//! Layering, lowest to highest precedence: built-in defaults, the TOML config
//! file, then `HOOKLINE__SECTION__KEY` environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::api::ServerState;
use crate::llm::OpenAiClientConfig;

pub const APP_NAME: &str = "hookline";

/// Environment variable consulted when `llm.api_key` is not configured.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum number of requests handled at once.
    pub max_concurrency: usize,
    /// Allowed CORS origins (empty = any).
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_concurrency: 10,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn state(&self) -> ServerState {
        ServerState {
            cors_origins: self.cors_origins.clone(),
            max_concurrency: self.max_concurrency,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// API key. Falls back to `api_key_env` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 120,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from config or environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.to_string());
        }
        env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "no LLM API key configured: set llm.api_key or the {} environment variable",
                    self.api_key_env
                )
            })
    }

    pub fn client_config(&self) -> Result<OpenAiClientConfig> {
        Ok(OpenAiClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.resolve_api_key()?,
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Load configuration from `path` (optional on disk) and the environment.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let defaults = AppConfig::default();
    let built = Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("server.max_concurrency", defaults.server.max_concurrency as i64)?
        .set_default("llm.base_url", defaults.llm.base_url)?
        .set_default("llm.model", defaults.llm.model)?
        .set_default("llm.api_key_env", defaults.llm.api_key_env)?
        .set_default("llm.timeout_secs", defaults.llm.timeout_secs as i64)?
        .set_default("logging.level", defaults.logging.level)?
        .add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(
            Environment::with_prefix(&env_prefix())
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("loading configuration from {}", path.display()))?;

    built
        .try_deserialize()
        .context("parsing configuration")
}

/// Write the default configuration file, creating parent directories.
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {parent:?}"))?;
    }

    let config = AppConfig::default();
    let toml = toml::to_string_pretty(&config).context("serializing default config to TOML")?;
    let mut body = default_config_header(path);
    body.push_str(&toml);
    fs::write(path, body).with_context(|| format!("writing config file to {}", path.display()))
}

fn default_config_header(path: &Path) -> String {
    let mut buffer = String::new();
    buffer.push_str("# Configuration for ");
    buffer.push_str(APP_NAME);
    buffer.push('\n');
    buffer.push_str("# File: ");
    buffer.push_str(&path.display().to_string());
    buffer.push('\n');
    buffer.push_str("# The API key is read from $");
    buffer.push_str(DEFAULT_API_KEY_ENV);
    buffer.push_str(" unless llm.api_key is set.\n");
    buffer.push('\n');
    buffer
}

/// Resolve the config file path, honoring an override file or directory.
pub fn config_file_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    match override_path {
        Some(path) => {
            let expanded = expand_path(path)?;
            if expanded.is_dir() {
                Ok(expanded.join("config.toml"))
            } else {
                Ok(expanded)
            }
        }
        None => Ok(default_config_dir()?.join("config.toml")),
    }
}

fn expand_path(path: PathBuf) -> Result<PathBuf> {
    if let Some(text) = path.to_str() {
        let expanded = shellexpand::full(text).context("expanding path")?;
        Ok(PathBuf::from(expanded.to_string()))
    } else {
        Ok(path)
    }
}

fn default_config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        let mut path = PathBuf::from(dir);
        path.push(APP_NAME);
        return Ok(path);
    }

    if let Some(mut dir) = dirs::config_dir() {
        dir.push(APP_NAME);
        return Ok(dir);
    }

    dirs::home_dir()
        .map(|home| home.join(".config").join(APP_NAME))
        .ok_or_else(|| anyhow!("unable to determine configuration directory"))
}

fn env_prefix() -> String {
    APP_NAME
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_concurrency, 10);
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(env_prefix(), "HOOKLINE");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.timeout_secs, 120);
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[server]\nport = 9100\ncors_origins = [\"http://localhost:3000\"]\n\n[llm]\nmodel = \"gpt-4o-mini\"\napi_key = \"sk-file\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.max_concurrency, 10);
        assert_eq!(config.server.cors_origins, ["http://localhost:3000"]);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.resolve_api_key().unwrap(), "sk-file");
    }

    #[test]
    fn test_written_default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path).unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("# Configuration for hookline"));

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_api_key_falls_back_to_named_env_var() {
        let llm = LlmConfig {
            api_key: None,
            api_key_env: "HOOKLINE_TEST_UNSET_KEY_VAR".to_string(),
            ..LlmConfig::default()
        };
        assert!(llm.resolve_api_key().is_err());

        let llm = LlmConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "HOOKLINE_TEST_UNSET_KEY_VAR".to_string(),
            ..LlmConfig::default()
        };
        assert!(llm.client_config().is_err());
    }

    #[test]
    fn test_config_path_for_directory_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(path, dir.path().join("config.toml"));
    }
}
