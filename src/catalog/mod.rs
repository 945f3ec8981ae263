//! Interface catalog wiring.
//!
//! This module reads JSON catalogs of capability interfaces (by default
//! `catalog/interfaces.json`) so callers can load a validated set of
//! interfaces instead of declaring them in code. Use `InterfaceIndex` for
//! validated lookups; `load_catalog_from_path` returns the raw file model.

pub mod index;
pub mod model;

pub use index::{CATALOG_SCHEMA_VERSION, InterfaceIndex, resolve_catalog_schema_path};
pub use model::{InterfaceCatalog, load_catalog_from_path};
