//! Configuration Loading
//!
//! Layers, lowest precedence first: built-in defaults, an optional JSON
//! file, then the environment (after `.env.local` and `.env` are loaded).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::settings::AppConfig;
use crate::utils::error::{AppError, AppResult};

/// Path of the JSON config file, when `--config` is not given
pub const CONFIG_PATH_VAR: &str = "CAREER_COMPASS_CONFIG";
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Accepted when `GEMINI_API_KEY` is unset
pub const API_KEY_ALIAS_VAR: &str = "EXPO_PUBLIC_GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Configuration service holding the effective settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: Option<PathBuf>,
    config: AppConfig,
}

impl ConfigService {
    /// Load the effective configuration from every layer.
    ///
    /// `explicit_path` takes precedence over `CAREER_COMPASS_CONFIG`.
    pub fn load(explicit_path: Option<&Path>) -> AppResult<Self> {
        load_dotenv_files();

        let config_path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_VAR).map(PathBuf::from));

        let mut config = match &config_path {
            Some(path) => Self::load_from_file(path)?,
            None => AppConfig::default(),
        };
        Self::apply_env(&mut config, |key| env::var(key).ok());
        config.validate().map_err(AppError::config)?;

        debug!(
            config_file = ?config_path,
            model = %config.model,
            has_api_key = config.has_api_key(),
            "configuration loaded"
        );

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Overlay environment values. Blank values are ignored.
    fn apply_env<F>(config: &mut AppConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_VAR).or_else(|| get(API_KEY_ALIAS_VAR)) {
            config.api_key = Some(key.trim().to_string());
        }
        if let Some(model) = get(MODEL_VAR) {
            config.model = model.trim().to_string();
        }
        if let Some(url) = get(BASE_URL_VAR) {
            config.base_url = Some(url.trim().to_string());
        }
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> AppConfig {
        self.config.clone()
    }

    /// File the configuration was read from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

fn load_dotenv_files() {
    // dotenvy never overrides variables that are already set, so earlier
    // files win over later ones.
    for file in DOTENV_FILES {
        match dotenvy::from_filename(file) {
            Ok(path) => debug!(path = %path.display(), "loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(file, error = %e, "ignoring unreadable environment file"),
        }
    }
}
