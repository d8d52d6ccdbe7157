//! Read-only access to the cached onboarding record.
//!
//! The device key/value store is modelled as a JSON object file mapping keys
//! to values. The onboarding entry may be stored as a JSON-encoded string (as
//! the device store does) or as a plain object.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Storage key of the onboarding record.
pub const ONBOARDING_KEY: &str = "@kaarya_onboarding_data";

/// Cached onboarding answers. Only `name` is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OnboardingData {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read the cached onboarding name.
///
/// Any failure (missing file, bad JSON, missing key or field) yields `None`;
/// the greeting is simply left blank.
pub fn read_cached_name(store_path: &Path) -> Option<String> {
    match read_onboarding(store_path) {
        Ok(Some(data)) => {
            let name = data.name.trim();
            (!name.is_empty()).then(|| name.to_string())
        }
        Ok(None) => {
            debug!(path = %store_path.display(), key = ONBOARDING_KEY, "no onboarding entry");
            None
        }
        Err(err) => {
            debug!(path = %store_path.display(), error = %format!("{err:#}"), "onboarding cache unreadable");
            None
        }
    }
}

/// Load the onboarding record, distinguishing "absent" from "unreadable".
pub fn read_onboarding(store_path: &Path) -> Result<Option<OnboardingData>> {
    if !store_path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(store_path)
        .with_context(|| format!("read store {}", store_path.display()))?;
    let store: Map<String, Value> = serde_json::from_str(&contents)
        .with_context(|| format!("parse store {}", store_path.display()))?;
    let Some(entry) = store.get(ONBOARDING_KEY) else {
        return Ok(None);
    };
    let record = match entry {
        Value::String(encoded) => {
            serde_json::from_str(encoded).context("parse encoded onboarding record")?
        }
        Value::Object(_) => entry.clone(),
        Value::Null => return Ok(None),
        other => return Err(anyhow!("unexpected onboarding value: {other}")),
    };
    let data: OnboardingData =
        serde_json::from_value(record).context("deserialize onboarding record")?;
    Ok(Some(data))
}

/// Greeting line shown on the home screen.
pub fn greeting(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Hello, {name}"),
        None => "Hello".to_string(),
    }
}
