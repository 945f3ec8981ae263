//! Indexed view of an interface catalog.
//!
//! The index enforces the expected catalog schema version and provides lookup
//! by interface id. It rejects duplicate ids and duplicate operation
//! signatures so two catalog entries can never claim the same identity.

use crate::catalog::{InterfaceCatalog, load_catalog_from_path};
use crate::interface::{CapabilityInterface, InterfaceId};
use crate::schema_loader::{SchemaLoadOptions, load_json_schema};
use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Catalog schema version this build understands.
pub const CATALOG_SCHEMA_VERSION: &str = "filter_interfaces_v1";

const CATALOG_SCHEMA_FILE: &str = "schema/interface_catalog.schema.json";

#[derive(Debug)]
/// Interfaces from one catalog, keyed by id.
pub struct InterfaceIndex {
    schema_version: String,
    description: Option<String>,
    by_id: BTreeMap<InterfaceId, Arc<CapabilityInterface>>,
}

impl InterfaceIndex {
    /// Load and validate a catalog from disk.
    ///
    /// Validates against the catalog JSON Schema, then applies the same checks
    /// as [`InterfaceIndex::from_catalog`].
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::from_catalog(catalog).with_context(|| format!("indexing {}", path.display()))
    }

    /// Index an already parsed catalog.
    pub fn from_catalog(catalog: InterfaceCatalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        let by_id = build_index(catalog.interfaces)?;
        Ok(Self {
            schema_version: catalog.schema_version,
            description: catalog.description,
            by_id,
        })
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Resolve an interface by id.
    pub fn interface(&self, id: &InterfaceId) -> Option<&Arc<CapabilityInterface>> {
        self.by_id.get(id)
    }

    /// Resolve several ids, keeping the requested order.
    ///
    /// Fails on the first id the catalog does not define.
    pub fn resolve(&self, ids: &[InterfaceId]) -> Result<Vec<Arc<CapabilityInterface>>> {
        ids.iter()
            .map(|id| {
                self.interface(id)
                    .cloned()
                    .ok_or_else(|| anyhow!("unknown interface '{}'", id))
            })
            .collect()
    }

    /// Iterates interface ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &InterfaceId> {
        self.by_id.keys()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([CATALOG_SCHEMA_VERSION.to_string()])
}

fn validate_interface_id(id: &InterfaceId) -> Result<()> {
    if id.0.is_empty() {
        bail!("interface id must not be empty");
    }
    if !id
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("interface id must match ^[A-Za-z0-9_.-]+$, got {}", id.0);
    }
    Ok(())
}

fn build_index(
    interfaces: Vec<CapabilityInterface>,
) -> Result<BTreeMap<InterfaceId, Arc<CapabilityInterface>>> {
    let mut map = BTreeMap::new();
    for interface in interfaces {
        validate_interface_id(&interface.id)?;
        if map.contains_key(&interface.id) {
            bail!("duplicate interface id {}", interface.id);
        }

        let mut signatures = BTreeSet::new();
        for operation in &interface.operations {
            if operation.name.trim().is_empty() {
                bail!("interface {} declares an operation with no name", interface.id);
            }
            if !signatures.insert((operation.name.as_str(), operation.arity())) {
                bail!(
                    "interface {} declares {} with {} parameter(s) more than once",
                    interface.id,
                    operation.name,
                    operation.arity()
                );
            }
        }

        map.insert(interface.id.clone(), Arc::new(interface));
    }
    Ok(map)
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )
    .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;

    if let Err(errors) = schema.compiled.validate(&catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "interface catalog {} failed schema validation ({}):\n{}",
            catalog_path.display(),
            schema.schema_version,
            details
        );
    }
    Ok(())
}

/// Schema used to validate `catalog_path`.
///
/// A `schema/` directory next to the catalog's parent directory wins, so a
/// catalog tree can ship its own schema; otherwise the crate's copy is used.
pub fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join(CATALOG_SCHEMA_FILE);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(CATALOG_SCHEMA_FILE)
}
