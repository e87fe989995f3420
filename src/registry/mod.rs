//! Capability registry populated from a cloud provider at startup.
//!
//! `CapabilityRegistry::register` queries the provider's catalog once, unions
//! the zones, architectures, and operating systems across every instance type,
//! and installs the provider's validators as the registry's hooks. The
//! registry is an explicit value: startup code owns it and hands out shared
//! references once registration succeeds.
//!
//! Names and sets are published asymmetrically. Instance-type names are
//! appended in catalog order and never deduplicated, so repeated
//! registrations accumulate names. The three capability sets are recomputed
//! from the latest catalog and replace the previous contents.

pub mod admission;
pub mod error;

pub use admission::{admit_constraints, admit_spec};
pub use error::{AdmissionError, HookError, RegistrationError};

use crate::provider::{
    CloudProvider, ConstraintValidator, Constraints, InstanceType, ProvisionerSpec, SpecValidator,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Provider validators installed by registration.
#[derive(Clone)]
pub struct ValidationHooks {
    constraints: Arc<dyn ConstraintValidator>,
    spec: Arc<dyn SpecValidator>,
}

impl ValidationHooks {
    /// Install both hooks from a single provider.
    pub fn from_provider<P>(provider: Arc<P>) -> Self
    where
        P: CloudProvider + 'static,
    {
        Self {
            constraints: provider.clone(),
            spec: provider,
        }
    }

    /// Delegates to the provider's constraint validator unchanged.
    pub fn validate_constraints(&self, constraints: &Constraints) -> anyhow::Result<()> {
        self.constraints.validate_constraints(constraints)
    }

    /// Delegates to the provider's spec validator unchanged.
    pub fn validate_spec(&self, spec: &ProvisionerSpec) -> anyhow::Result<()> {
        self.spec.validate_spec(spec)
    }
}

impl fmt::Debug for ValidationHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationHooks").finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
/// Published capability sets plus the installed validation hooks.
pub struct CapabilityRegistry {
    instance_types: Vec<String>,
    zones: BTreeSet<String>,
    architectures: BTreeSet<String>,
    operating_systems: BTreeSet<String>,
    provider: Option<String>,
    hooks: Option<ValidationHooks>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Serializable view of a registry for reports and debugging.
pub struct RegistrySnapshot {
    pub provider: Option<String>,
    pub instance_types: Vec<String>,
    pub zones: Vec<String>,
    pub architectures: Vec<String>,
    pub operating_systems: Vec<String>,
    pub hooks_installed: bool,
}

/// Result of one pass over a provider's catalog.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CatalogAggregate {
    pub names: Vec<String>,
    pub zones: BTreeSet<String>,
    pub architectures: BTreeSet<String>,
    pub operating_systems: BTreeSet<String>,
}

/// Union every instance type's placement values; names keep catalog order.
pub(crate) fn aggregate_catalog(instance_types: &[Arc<dyn InstanceType>]) -> CatalogAggregate {
    let mut aggregate = CatalogAggregate {
        names: Vec::with_capacity(instance_types.len()),
        ..Default::default()
    };
    for instance_type in instance_types {
        aggregate.names.push(instance_type.name().to_string());
        aggregate.zones.extend(instance_type.zones().iter().cloned());
        aggregate
            .architectures
            .extend(instance_type.architectures().iter().cloned());
        aggregate
            .operating_systems
            .extend(instance_type.operating_systems().iter().cloned());
    }
    aggregate
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry and register `provider` into it once.
    pub fn from_provider<P>(provider: Arc<P>) -> Result<Self, RegistrationError>
    where
        P: CloudProvider + 'static,
    {
        let mut registry = Self::new();
        registry.register(provider)?;
        Ok(registry)
    }

    /// Populate the registry from `provider` and install its validators.
    ///
    /// Intended to run once during startup, before the registry is shared.
    /// On failure nothing is published and the error should abort startup.
    /// Re-running appends the catalog's names again and replaces the zone,
    /// architecture, and OS sets with the latest catalog's unions.
    pub fn register<P>(&mut self, provider: Arc<P>) -> Result<(), RegistrationError>
    where
        P: CloudProvider + 'static,
    {
        let provider_name = provider.name().to_string();
        let instance_types = match provider.instance_types() {
            Ok(instance_types) => instance_types,
            Err(source) => {
                error!(
                    provider = %provider_name,
                    error = %format!("{source:#}"),
                    "failed to retrieve instance types"
                );
                return Err(RegistrationError::CatalogRetrieval {
                    provider: provider_name,
                    source,
                });
            }
        };

        let aggregate = aggregate_catalog(&instance_types);
        debug!(
            provider = %provider_name,
            zones = ?aggregate.zones,
            architectures = ?aggregate.architectures,
            operating_systems = ?aggregate.operating_systems,
            "aggregated instance-type catalog"
        );

        self.instance_types.extend(aggregate.names);
        self.zones = aggregate.zones;
        self.architectures = aggregate.architectures;
        self.operating_systems = aggregate.operating_systems;
        self.hooks = Some(ValidationHooks::from_provider(provider));

        info!(
            provider = %provider_name,
            instance_types = instance_types.len(),
            zones = self.zones.len(),
            architectures = self.architectures.len(),
            operating_systems = self.operating_systems.len(),
            "registered cloud provider capabilities"
        );
        self.provider = Some(provider_name);
        Ok(())
    }

    /// Instance-type names in catalog order, duplicates included.
    pub fn instance_types(&self) -> &[String] {
        &self.instance_types
    }

    pub fn zones(&self) -> &BTreeSet<String> {
        &self.zones
    }

    pub fn architectures(&self) -> &BTreeSet<String> {
        &self.architectures
    }

    pub fn operating_systems(&self) -> &BTreeSet<String> {
        &self.operating_systems
    }

    /// Name of the most recently registered provider.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn supports_instance_type(&self, name: &str) -> bool {
        self.instance_types.iter().any(|known| known == name)
    }

    pub fn supports_zone(&self, zone: &str) -> bool {
        self.zones.contains(zone)
    }

    pub fn supports_architecture(&self, architecture: &str) -> bool {
        self.architectures.contains(architecture)
    }

    pub fn supports_operating_system(&self, operating_system: &str) -> bool {
        self.operating_systems.contains(operating_system)
    }

    pub fn hooks(&self) -> Option<&ValidationHooks> {
        self.hooks.as_ref()
    }

    /// True once a registration has succeeded.
    pub fn is_registered(&self) -> bool {
        self.hooks.is_some()
    }

    /// Run the installed constraint hook.
    pub fn validate_constraints(&self, constraints: &Constraints) -> Result<(), HookError> {
        let hooks = self.hooks.as_ref().ok_or(HookError::NotRegistered)?;
        hooks
            .validate_constraints(constraints)
            .map_err(HookError::Rejected)
    }

    /// Run the installed spec hook.
    pub fn validate_spec(&self, spec: &ProvisionerSpec) -> Result<(), HookError> {
        let hooks = self.hooks.as_ref().ok_or(HookError::NotRegistered)?;
        hooks.validate_spec(spec).map_err(HookError::Rejected)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            provider: self.provider.clone(),
            instance_types: self.instance_types.clone(),
            zones: self.zones.iter().cloned().collect(),
            architectures: self.architectures.iter().cloned().collect(),
            operating_systems: self.operating_systems.iter().cloned().collect(),
            hooks_installed: self.hooks.is_some(),
        }
    }
}
