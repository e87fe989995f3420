//! Cloud-provider contract consumed by the registrar.
//!
//! A provider exposes its instance-type catalog plus two validators. The
//! registrar only reads the catalog once and stores the validators as hooks;
//! everything else about a provider (API clients, caching) stays behind these
//! traits.

pub mod constraints;

pub use constraints::{Constraints, ProvisionerSpec};

use anyhow::Result;
use std::sync::Arc;

/// One catalog entry advertised by a provider.
pub trait InstanceType: Send + Sync {
    fn name(&self) -> &str;
    fn zones(&self) -> &[String];
    fn architectures(&self) -> &[String];
    fn operating_systems(&self) -> &[String];
}

/// Provider-specific checks for user-supplied provisioning constraints.
pub trait ConstraintValidator: Send + Sync {
    fn validate_constraints(&self, constraints: &Constraints) -> Result<()>;
}

/// Provider-specific checks for a full provisioner spec.
pub trait SpecValidator: Send + Sync {
    fn validate_spec(&self, spec: &ProvisionerSpec) -> Result<()>;
}

/// A pluggable cloud provider.
///
/// `instance_types` may fail; the registrar treats any failure as fatal for
/// startup. Entries are returned in catalog order and may repeat a name.
pub trait CloudProvider: ConstraintValidator + SpecValidator {
    /// Short identifier used in diagnostics (e.g. `static`, `aws`).
    fn name(&self) -> &str;

    fn instance_types(&self) -> Result<Vec<Arc<dyn InstanceType>>>;
}
