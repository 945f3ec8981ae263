//! Runtime configuration shared by binaries.
//!
//! Configuration is environment-driven: `FILTERWIRE_CATALOG` selects the
//! interface catalog and `FILTERWIRE_LOG` (falling back to `RUST_LOG`) sets the
//! log filter. Binaries go through these helpers instead of reading the
//! environment themselves.

use anyhow::{Context, Result, bail};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const CATALOG_ENV: &str = "FILTERWIRE_CATALOG";
pub const LOG_ENV: &str = "FILTERWIRE_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Catalog shipped with the crate.
pub fn default_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("catalog/interfaces.json")
}

/// Pick the catalog path: explicit argument, then `FILTERWIRE_CATALOG`, then
/// the shipped default. The chosen file must exist.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let candidate = match explicit {
        Some(path) => path.to_path_buf(),
        None => catalog_path_from_env().unwrap_or_else(default_catalog_path),
    };
    if !candidate.is_file() {
        bail!("interface catalog not found at {}", candidate.display());
    }
    Ok(candidate)
}

fn catalog_path_from_env() -> Option<PathBuf> {
    env::var_os(CATALOG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn log_filter() -> EnvFilter {
    for var in [LOG_ENV, "RUST_LOG"] {
        if let Ok(filter) = EnvFilter::try_from_env(var) {
            return filter;
        }
    }
    EnvFilter::new(DEFAULT_LOG_FILTER)
}

/// Install a stderr fmt subscriber. Fails if a global subscriber is already
/// set.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to initialize tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_must_exist() {
        let missing = Path::new("/definitely/not/here.json");
        let err = resolve_catalog_path(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("not found"));

        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(resolve_catalog_path(Some(file.path())).unwrap(), file.path());
    }

    #[test]
    fn default_catalog_ships_with_crate() {
        assert!(default_catalog_path().is_file());
    }
}
