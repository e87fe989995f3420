//! Validated loading of instance-type catalogs.
//!
//! The embedded schema pins the version, the provider identifier, and the
//! entry shape. On top of that, loading rejects names and list values that
//! are only whitespace, so the registrar never publishes blank zones or
//! architectures. It is not
//! strict about repeated instance-type names: the registry keeps names in
//! catalog order, duplicates included.

use crate::catalog::{InstanceTypeCatalog, InstanceTypeEntry};
use crate::schema_loader::{
    CATALOG_SCHEMA, SchemaLoadOptions, SchemaLoadResult, load_json_schema, validate_instance,
};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

pub const CATALOG_SCHEMA_VERSION: &str = "instance_type_catalog_v1";

impl InstanceTypeCatalog {
    /// Load and validate a catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        Self::from_value(value, &path.display().to_string())
    }

    /// Validate an already-parsed catalog document.
    ///
    /// `label` names the source in error messages (usually the file path).
    pub fn from_value(value: Value, label: &str) -> Result<Self> {
        let schema = catalog_schema()?;
        validate_instance(&schema, &value, &format!("instance-type catalog {label}"))?;

        let catalog: InstanceTypeCatalog = serde_json::from_value(value)
            .with_context(|| format!("decoding catalog {label}"))?;
        for (idx, entry) in catalog.instance_types.iter().enumerate() {
            validate_entry(idx, entry)?;
        }
        debug!(
            catalog = label,
            schema_version = %schema.schema_version,
            instance_types = catalog.instance_types.len(),
            "catalog validated"
        );
        Ok(catalog)
    }
}

fn catalog_schema() -> Result<SchemaLoadResult> {
    let allowed = BTreeSet::from([CATALOG_SCHEMA_VERSION.to_string()]);
    load_json_schema(
        CATALOG_SCHEMA,
        "instance_type_catalog.schema.json",
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )
}

fn validate_entry(idx: usize, entry: &InstanceTypeEntry) -> Result<()> {
    if entry.name.trim().is_empty() {
        bail!("instance_types[{idx}] has no name");
    }
    let lists = [
        ("zones", &entry.zones),
        ("architectures", &entry.architectures),
        ("operating_systems", &entry.operating_systems),
    ];
    for (field, values) in lists {
        if values.iter().any(|value| value.trim().is_empty()) {
            bail!(
                "instance type {} lists an empty entry in {field}",
                entry.name
            );
        }
    }
    Ok(())
}
