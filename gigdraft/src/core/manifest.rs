//! Cosmetic manifest identifiers (`KY-####`) for submitted gigs.

use std::fmt;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREFIX: &str = "KY-";

static MANIFEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^KY-\d{4}$").expect("manifest id regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid manifest id '{0}' (expected KY-####)")]
pub struct InvalidManifestId(pub String);

/// Human-readable id assigned at submission.
///
/// Drawn uniformly from `KY-1000..=KY-9999`. Ids are not unique across
/// submissions and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ManifestId(String);

impl ManifestId {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let number: u16 = rng.gen_range(1000..=9999);
        Self(format!("{PREFIX}{number}"))
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidManifestId> {
        if MANIFEST_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidManifestId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManifestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ManifestId {
    type Error = InvalidManifestId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ManifestId> for String {
    fn from(value: ManifestId) -> Self {
        value.0
    }
}
