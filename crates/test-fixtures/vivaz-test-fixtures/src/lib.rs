use std::collections::HashMap;
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
    descriptors: HashMap<String, String>,
    exports: HashMap<String, ExportEntry>,
}

/// Export text plus the values its static attributes must resolve to.
#[derive(Debug, Deserialize)]
struct ExportEntry {
    text: String,
    #[serde(default)]
    values: Option<String>,
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

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Schema attribute objects accepted by `Schema::define`.
pub mod descriptors {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.descriptors.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.descriptors, "descriptor", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.descriptors, "descriptor", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.descriptors, "descriptor", name)?;
        Ok(resolve_path(rel))
    }
}

/// Schema export texts.
pub mod exports {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.exports.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn text(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.exports, "export", name)?;
        read_to_string(&entry.text)
    }

    /// Expected `path -> value` pairs for the export, when recorded.
    pub fn values<T: DeserializeOwned>(name: &str) -> Result<Option<T>> {
        let entry = lookup(&MANIFEST.exports, "export", name)?;
        match &entry.values {
            Some(rel) => super::load_json(rel).map(Some),
            None => Ok(None),
        }
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.exports, "export", name)?;
        Ok(resolve_path(&entry.text))
    }
}
