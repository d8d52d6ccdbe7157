//! Wizard configuration stored under `.gigdraft/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::validators::ValidationRules;

/// Upper bound on the simulated submission delay.
const MAX_SUBMIT_DELAY_MS: u64 = 60_000;

/// Wizard configuration (TOML).
///
/// Missing fields default to the behavior of the mobile app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WizardConfig {
    /// Require a non-blank description before leaving the details step.
    pub require_description: bool,

    /// Simulated submission latency in milliseconds.
    pub submit_delay_ms: u64,

    /// Key/value store file holding the cached onboarding data.
    pub onboarding_store: PathBuf,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            require_description: false,
            submit_delay_ms: 1500,
            onboarding_store: PathBuf::from(".gigdraft/storage.json"),
        }
    }
}

impl WizardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.submit_delay_ms > MAX_SUBMIT_DELAY_MS {
            return Err(anyhow!(
                "submit_delay_ms must be <= {}",
                MAX_SUBMIT_DELAY_MS
            ));
        }
        if self.onboarding_store.as_os_str().is_empty() {
            return Err(anyhow!("onboarding_store must be a non-empty path"));
        }
        Ok(())
    }

    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            require_description: self.require_description,
        }
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `WizardConfig::default()`.
pub fn load_config(path: &Path) -> Result<WizardConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = WizardConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: WizardConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &WizardConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
