//! Capability registrar for pluggable cloud providers.
//!
//! At startup a cloud provider's instance-type catalog is read once and folded
//! into a [`CapabilityRegistry`]: the ordered list of instance-type names plus
//! the unions of every supported zone, architecture, and operating system. The
//! provider's constraint and spec validators are installed alongside as hooks.
//! Downstream code admits user-supplied constraints against the registry via
//! [`admit_constraints`] and [`admit_spec`].
//!
//! The crate also ships a file-backed [`StaticProvider`] and the
//! `capability-report` binary that registers it and prints the result.

use anyhow::{Result, bail};
use std::env;
use std::path::{Path, PathBuf};

pub mod catalog;
pub mod logging;
pub mod provider;
pub mod registry;
mod schema_loader;

pub use catalog::{
    CatalogVersion, InstanceTypeCatalog, InstanceTypeEntry, ProviderName, StaticProvider,
};
pub use provider::{
    CloudProvider, ConstraintValidator, Constraints, InstanceType, ProvisionerSpec, SpecValidator,
};
pub use registry::{
    AdmissionError, CapabilityRegistry, HookError, RegistrationError, RegistrySnapshot,
    ValidationHooks, admit_constraints, admit_spec,
};

/// Environment variable naming the catalog file when no flag is given.
pub const CATALOG_ENV: &str = "CAPABILITY_CATALOG";

const DEFAULT_CATALOG: &str = "catalogs/static_v1.json";

/// The catalog bundled with the crate.
pub fn default_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CATALOG)
}

/// Locate the catalog file to register.
///
/// Search order: the explicit path (usually a `--catalog` flag), then
/// `CAPABILITY_CATALOG` when it is set and non-empty, then the bundled
/// catalog. The chosen path must exist; there is no further fallback once a
/// source has been picked, so a typo in the flag or env var is reported
/// instead of silently registering the bundled catalog.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let (candidate, source) = if let Some(path) = explicit {
        (path.to_path_buf(), "--catalog")
    } else if let Some(value) = env::var_os(CATALOG_ENV).filter(|v| !v.is_empty()) {
        (PathBuf::from(value), CATALOG_ENV)
    } else {
        (default_catalog_path(), "bundled default")
    };

    if !candidate.is_file() {
        bail!(
            "Catalog {} (from {source}) does not exist or is not a file",
            candidate.display()
        );
    }
    Ok(candidate)
}
