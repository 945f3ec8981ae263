//! JSON Schema loading for interface catalogs.
//!
//! Loads a schema file, checks its embedded `schema_version` const against the
//! allowed set, and compiles a validator.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how the schema version is located and checked before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl<'a> Default for SchemaLoadOptions<'a> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            allowed_versions: None,
        }
    }
}

pub(crate) fn load_json_schema(
    path: &Path,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;

    let schema_version = extract_schema_version(&schema, options.schema_version_pointer)
        .ok_or_else(|| anyhow!("schema {} missing schema_version const", path.display()))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_schema(value: &Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    #[test]
    fn extracts_and_checks_version() {
        let file = write_schema(&json!({
            "type": "object",
            "properties": {"schema_version": {"const": "demo_v1"}}
        }));
        let allowed = BTreeSet::from(["demo_v1".to_string()]);
        let loaded = load_json_schema(
            file.path(),
            SchemaLoadOptions {
                allowed_versions: Some(&allowed),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(loaded.schema_version, "demo_v1");
        assert!(loaded.compiled.is_valid(&json!({"schema_version": "demo_v1"})));
        assert!(!loaded.compiled.is_valid(&json!({"schema_version": "other"})));

        let other = BTreeSet::from(["demo_v2".to_string()]);
        let err = load_json_schema(
            file.path(),
            SchemaLoadOptions {
                allowed_versions: Some(&other),
                ..Default::default()
            },
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("not in allowed set"));
    }

    #[test]
    fn schema_without_version_const_is_rejected() {
        let file = write_schema(&json!({"type": "object"}));
        let err = load_json_schema(file.path(), SchemaLoadOptions::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("missing schema_version const"));
    }
}
