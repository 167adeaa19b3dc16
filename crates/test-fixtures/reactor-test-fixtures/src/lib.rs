//! Shared JSON fixtures for reactor tests, resolved through
//! `fixtures/manifest.json` at the workspace root.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    presets: BTreeMap<String, PresetEntry>,
    /// Presets the loader must reject, keyed by name.
    #[serde(default)]
    invalid: BTreeMap<String, InvalidEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PresetEntry {
    Path(String),
    Detailed { path: String },
}

impl PresetEntry {
    fn as_path(&self) -> &str {
        match self {
            PresetEntry::Path(path) => path,
            PresetEntry::Detailed { path } => path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct InvalidEntry {
    path: String,
    /// Expected error category, e.g. "config" or "serialization".
    category: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a BTreeMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod presets {
    use super::*;

    /// Preset names in sorted order.
    pub fn keys() -> Vec<String> {
        MANIFEST.presets.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.presets, "preset", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.presets, "preset", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.presets, "preset", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}

pub mod invalid {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.invalid.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.invalid, "invalid preset", name)?;
        read_to_string(&entry.path)
    }

    /// Error category the loader is expected to report for `name`.
    pub fn expected_category(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.invalid, "invalid preset", name)?;
        Ok(entry.category.clone())
    }
}
