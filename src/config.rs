//! Typed configuration: defaults, optional JSON file, environment, flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::UiError;

pub const ENV_CONFIG: &str = "RAPTURE_CONFIG";
pub const ENV_URL: &str = "RAPTURE_URL";
pub const ENV_TOKEN: &str = "RAPTURE_TOKEN";

const APP_DIR: &str = "rapture";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaptureConfig {
    pub backend: BackendConfig,
    pub router: RouterConfig,
    pub shell: ShellConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    pub base_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout_secs: u64,

    /// Attempts per request, including the first one.
    pub retries: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            token: None,
            timeout_secs: 30,
            retries: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Bookmark opened at startup instead of the first visible feature.
    pub initial_bookmark: Option<String>,

    /// Navigate to the first visible feature when the bookmark is empty.
    pub auto_select_first: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            initial_bookmark: None,
            auto_select_first: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampStyle {
    #[default]
    Relative,
    Absolute,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    pub timestamps: TimestampStyle,

    /// How long a transient notification stays in the status line.
    pub notification_secs: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            timestamps: TimestampStyle::Relative,
            notification_secs: 5,
        }
    }
}

impl RaptureConfig {
    /// Reads `path`, or the default location when it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_path().filter(|p| p.exists()),
        };
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_URL).filter(|v| !v.trim().is_empty()) {
            self.backend.base_url = url;
        }
        if let Some(token) = var(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.backend.token = Some(token);
        }
    }

    pub fn apply_flags(&mut self, url: Option<String>, token: Option<String>) {
        if let Some(url) = url {
            self.backend.base_url = url;
        }
        if let Some(token) = token {
            self.backend.token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<(), UiError> {
        let url = self.backend.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(UiError::Config(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                self.backend.base_url
            )));
        }
        if self.backend.retries == 0 {
            return Err(UiError::Config("backend.retries must be at least 1".to_string()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(UiError::Config(
                "backend.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.json"))
}

/// Where the shell writes its log file.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
