//! Configuration and backend factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dojoscore_core::roi::RoiInputs;
use dojoscore_core::traits::ProgressStore;

use crate::json_file::JsonFileStore;
use crate::memory::MemoryStore;
use crate::sheet::SheetStore;

/// Which backend holds the user table.
///
/// Note: Custom Debug impl masks the sheet API token to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    Json {
        #[serde(default = "default_data_file")]
        path: PathBuf,
    },
    Sheet {
        base_url: String,
        #[serde(default)]
        api_token: Option<String>,
    },
    Memory,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreConfig::Json { path } => f.debug_struct("Json").field("path", path).finish(),
            StoreConfig::Sheet {
                base_url,
                api_token,
            } => f
                .debug_struct("Sheet")
                .field("base_url", base_url)
                .field("api_token", &api_token.as_ref().map(|_| "***"))
                .finish(),
            StoreConfig::Memory => f.debug_struct("Memory").finish(),
        }
    }
}

fn default_data_file() -> PathBuf {
    // The file name the legacy deployments already use.
    PathBuf::from("user_progress.json")
}

/// Default ROI dashboard inputs, overridable per run from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiDefaults {
    #[serde(default = "default_time_saved")]
    pub time_saved_hours: f64,
    #[serde(default = "default_cost_per_hour")]
    pub cost_per_hour: f64,
    #[serde(default = "default_participation_threshold")]
    pub participation_threshold: u64,
}

fn default_time_saved() -> f64 {
    0.25
}
fn default_cost_per_hour() -> f64 {
    50.0
}
fn default_participation_threshold() -> u64 {
    10
}

impl Default for RoiDefaults {
    fn default() -> Self {
        Self {
            time_saved_hours: default_time_saved(),
            cost_per_hour: default_cost_per_hour(),
            participation_threshold: default_participation_threshold(),
        }
    }
}

/// Top-level dojoscore configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DojoscoreConfig {
    /// Backend selection.
    #[serde(default = "default_store")]
    pub store: StoreConfig,
    /// Account excluded from every aggregate.
    #[serde(default = "default_admin")]
    pub admin_username: String,
    /// ROI dashboard defaults.
    #[serde(default)]
    pub roi: RoiDefaults,
}

fn default_store() -> StoreConfig {
    StoreConfig::Json {
        path: default_data_file(),
    }
}

fn default_admin() -> String {
    "admin".to_string()
}

impl Default for DojoscoreConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            admin_username: default_admin(),
            roi: RoiDefaults::default(),
        }
    }
}

impl DojoscoreConfig {
    /// Assemble the ROI inputs, letting CLI flags override the file values.
    pub fn roi_inputs(
        &self,
        time_saved: Option<f64>,
        cost_per_hour: Option<f64>,
        threshold: Option<u64>,
    ) -> RoiInputs {
        RoiInputs {
            time_saved_hours: time_saved.unwrap_or(self.roi.time_saved_hours),
            cost_per_hour: cost_per_hour.unwrap_or(self.roi.cost_per_hour),
            participation_threshold: threshold.unwrap_or(self.roi.participation_threshold),
            admin_username: self.admin_username.clone(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_store_config(config: &StoreConfig) -> StoreConfig {
    match config {
        StoreConfig::Json { path } => StoreConfig::Json { path: path.clone() },
        StoreConfig::Sheet {
            base_url,
            api_token,
        } => StoreConfig::Sheet {
            base_url: resolve_env_vars(base_url),
            api_token: api_token.as_ref().map(|t| resolve_env_vars(t)),
        },
        StoreConfig::Memory => StoreConfig::Memory,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `dojoscore.toml` in the current directory
/// 2. `~/.config/dojoscore/config.toml`
///
/// Environment variable override: `DOJOSCORE_SHEET_TOKEN`.
pub fn load_config() -> Result<DojoscoreConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DojoscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("dojoscore.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<DojoscoreConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DojoscoreConfig::default(),
    };

    if let Ok(token) = std::env::var("DOJOSCORE_SHEET_TOKEN") {
        if let StoreConfig::Sheet { api_token, .. } = &mut config.store {
            *api_token = Some(token);
        }
    }

    config.store = resolve_store_config(&config.store);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("dojoscore"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Box<dyn ProgressStore> {
    match config {
        StoreConfig::Json { path } => Box::new(JsonFileStore::new(path)),
        StoreConfig::Sheet {
            base_url,
            api_token,
        } => Box::new(SheetStore::new(base_url, api_token.clone())),
        StoreConfig::Memory => Box::new(MemoryStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_DOJOSCORE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_DOJOSCORE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_DOJOSCORE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_DOJOSCORE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = DojoscoreConfig::default();
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.roi.participation_threshold, 10);
        assert!(matches!(config.store, StoreConfig::Json { .. }));
    }

    #[test]
    fn parse_sheet_config() {
        let toml_str = r#"
admin_username = "root"

[store]
type = "sheet"
base_url = "https://sheets.example.com/v1/training"
api_token = "${SHEET_TOKEN}"

[roi]
time_saved_hours = 0.5
cost_per_hour = 80.0
participation_threshold = 5
"#;
        let config: DojoscoreConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.admin_username, "root");
        assert!(matches!(config.store, StoreConfig::Sheet { .. }));
        assert_eq!(config.roi.cost_per_hour, 80.0);
    }

    #[test]
    fn parse_json_config_with_default_path() {
        let config: DojoscoreConfig = toml::from_str("[store]\ntype = \"json\"\n").unwrap();
        match config.store {
            StoreConfig::Json { path } => {
                assert_eq!(path, PathBuf::from("user_progress.json"));
            }
            other => panic!("expected json store, got {other:?}"),
        }
    }

    #[test]
    fn cli_overrides_win_over_file_defaults() {
        let config = DojoscoreConfig::default();
        let inputs = config.roi_inputs(Some(1.0), None, Some(3));
        assert_eq!(inputs.time_saved_hours, 1.0);
        assert_eq!(inputs.cost_per_hour, 50.0);
        assert_eq!(inputs.participation_threshold, 3);
        assert_eq!(inputs.admin_username, "admin");
    }

    #[test]
    fn debug_masks_the_api_token() {
        let config = StoreConfig::Sheet {
            base_url: "https://sheets.example.com".into(),
            api_token: Some("sekrit".into()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sekrit"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn factory_builds_each_backend() {
        assert_eq!(create_store(&default_store()).name(), "json-file");
        assert_eq!(create_store(&StoreConfig::Memory).name(), "memory");
        let sheet = StoreConfig::Sheet {
            base_url: "http://localhost:9".into(),
            api_token: None,
        };
        assert_eq!(create_store(&sheet).name(), "sheet");
    }
}
