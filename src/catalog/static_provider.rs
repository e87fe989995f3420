//! File-backed `CloudProvider`.
//!
//! The catalog query is a local read of an already-validated
//! `InstanceTypeCatalog`, so it is deterministic and never fails after
//! construction. The static provider accepts no provider-specific
//! configuration; its validators reject any `provider` blob.

use crate::catalog::{InstanceTypeCatalog, InstanceTypeEntry, ProviderName};
use crate::provider::{
    CloudProvider, ConstraintValidator, Constraints, InstanceType, ProvisionerSpec, SpecValidator,
};
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct StaticProvider {
    name: ProviderName,
    instance_types: Vec<Arc<InstanceTypeEntry>>,
}

impl StaticProvider {
    pub fn new(catalog: InstanceTypeCatalog) -> Self {
        Self {
            name: catalog.provider,
            instance_types: catalog.instance_types.into_iter().map(Arc::new).collect(),
        }
    }

    /// Load and validate a catalog file, then wrap it.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog = InstanceTypeCatalog::load(path)
            .with_context(|| format!("loading static catalog {}", path.display()))?;
        Ok(Self::new(catalog))
    }
}

impl ConstraintValidator for StaticProvider {
    fn validate_constraints(&self, constraints: &Constraints) -> Result<()> {
        if constraints.provider.is_some() {
            bail!(
                "provider '{}' does not accept provider-specific constraints",
                self.name
            );
        }
        Ok(())
    }
}

impl SpecValidator for StaticProvider {
    fn validate_spec(&self, spec: &ProvisionerSpec) -> Result<()> {
        self.validate_constraints(&spec.constraints)
            .context("invalid spec constraints")
    }
}

impl CloudProvider for StaticProvider {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn instance_types(&self) -> Result<Vec<Arc<dyn InstanceType>>> {
        Ok(self
            .instance_types
            .iter()
            .map(|entry| Arc::clone(entry) as Arc<dyn InstanceType>)
            .collect())
    }
}
