//! Deserializable representation of an interface catalog file.
//!
//! Interfaces deserialize straight into [`CapabilityInterface`], so a catalog
//! entry and an interface declared in code are the same value. Use
//! [`InterfaceIndex`](crate::catalog::InterfaceIndex) for validation and id
//! lookup; these types are the raw file surface.

use crate::interface::CapabilityInterface;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full interface catalog as stored on disk.
pub struct InterfaceCatalog {
    pub schema_version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub interfaces: Vec<CapabilityInterface>,
}

/// Read and parse an interface catalog from disk without additional
/// validation.
pub fn load_catalog_from_path(path: &Path) -> Result<InterfaceCatalog> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog: InterfaceCatalog =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(catalog)
}
