//! Deserializable representation of an instance-type catalog file.
//!
//! Use `InstanceTypeCatalog::load` to read one from disk.

use crate::catalog::identity::{CatalogVersion, ProviderName};
use crate::provider::InstanceType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Full catalog as stored on disk.
pub struct InstanceTypeCatalog {
    pub schema_version: CatalogVersion,
    pub provider: ProviderName,
    /// Catalog order is significant: the registry publishes names in this order.
    pub instance_types: Vec<InstanceTypeEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One instance type with the placement values it supports.
pub struct InstanceTypeEntry {
    pub name: String,
    pub zones: Vec<String>,
    pub architectures: Vec<String>,
    pub operating_systems: Vec<String>,
}

impl InstanceType for InstanceTypeEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn zones(&self) -> &[String] {
        &self.zones
    }

    fn architectures(&self) -> &[String] {
        &self.architectures
    }

    fn operating_systems(&self) -> &[String] {
        &self.operating_systems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_requires_every_placement_list() {
        let err = serde_json::from_value::<InstanceTypeEntry>(json!({
            "name": "m5.large",
            "architectures": ["amd64"],
            "operating_systems": ["linux"]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("zones"), "{err}");
    }
}
