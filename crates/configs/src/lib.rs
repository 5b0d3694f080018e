use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the preferences medium lives.
///
/// `backend` is one of `file`, `memory` or `disabled`.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: default_backend(), data_dir: default_data_dir(), file_name: default_file_name() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Cards currently enabled in the product, in display order.
    #[serde(default = "default_available_cards")]
    pub available_cards: Vec<String>,
    /// Product-defined pins used until the user customises the dashboard.
    #[serde(default = "default_pins")]
    pub default_pins: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { available_cards: default_available_cards(), default_pins: default_pins() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

pub const BACKENDS: [&str; 3] = ["file", "memory", "disabled"];

fn default_backend() -> String { "file".into() }
fn default_data_dir() -> String { "data".into() }
fn default_file_name() -> String { "preferences.json".into() }
fn default_log_format() -> String { "compact".into() }

fn default_available_cards() -> Vec<String> {
    ["net-worth", "cash-flow", "budgets", "subscriptions", "recent-transactions", "setup-checklist"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_pins() -> Vec<String> {
    ["net-worth", "cash-flow", "setup-checklist"].iter().map(|s| s.to_string()).collect()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like [`AppConfig::load_and_validate`] but a missing config file yields defaults.
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 storage（支持从环境变量覆盖数据目录）
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.dashboard.normalize();
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("PREFS_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
        self.backend = self.backend.trim().to_ascii_lowercase();
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !BACKENDS.contains(&self.backend.as_str()) {
            return Err(anyhow!("storage.backend must be one of {:?}, got {:?}", BACKENDS, self.backend));
        }
        if self.file_name.trim().is_empty() {
            return Err(anyhow!("storage.file_name is empty"));
        }
        Ok(())
    }

    /// Full path of the backing file for the `file` backend.
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.file_name)
    }
}

impl DashboardConfig {
    fn normalize(&mut self) {
        self.available_cards = trimmed_non_empty(&self.available_cards);
        self.default_pins = trimmed_non_empty(&self.default_pins);
    }
}

fn trimmed_non_empty(ids: &[String]) -> Vec<String> {
    ids.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
