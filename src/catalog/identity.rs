use serde::{Deserialize, Serialize};
use std::fmt;

/// Versioned key for the catalog file format (e.g. `instance_type_catalog_v1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogVersion(pub String);

/// Identifier of the provider a catalog describes (e.g. `static`, `aws`).
///
/// Carried into registration errors and the registry snapshot so operators
/// can tell which provider produced the published sets.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderName(pub String);

impl ProviderName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
