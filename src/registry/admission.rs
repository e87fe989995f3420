//! Admission of user-supplied constraints and specs.
//!
//! Checks requested values against the published capability sets first and
//! only then consults the provider's hooks, so operators see every
//! unsupported zone, instance type, architecture, or OS in one report.

use crate::provider::{Constraints, ProvisionerSpec};
use crate::registry::{AdmissionError, CapabilityRegistry};
use tracing::debug;

/// Admit `constraints` against `registry` and the installed constraint hook.
pub fn admit_constraints(
    registry: &CapabilityRegistry,
    constraints: &Constraints,
) -> Result<(), AdmissionError> {
    if !registry.is_registered() {
        return Err(AdmissionError::NotRegistered);
    }
    check_supported(registry, constraints)?;
    registry.validate_constraints(constraints)?;
    debug!("constraints admitted");
    Ok(())
}

/// Admit `spec`: range checks, supported values, then the spec hook.
pub fn admit_spec(
    registry: &CapabilityRegistry,
    spec: &ProvisionerSpec,
) -> Result<(), AdmissionError> {
    if !registry.is_registered() {
        return Err(AdmissionError::NotRegistered);
    }
    if spec.ttl_seconds_after_empty == Some(0) {
        return Err(AdmissionError::InvalidSpec(
            "ttl_seconds_after_empty must be greater than zero".to_string(),
        ));
    }
    if spec.ttl_seconds_until_expired == Some(0) {
        return Err(AdmissionError::InvalidSpec(
            "ttl_seconds_until_expired must be greater than zero".to_string(),
        ));
    }
    check_supported(registry, &spec.constraints)?;
    registry.validate_spec(spec)?;
    debug!("spec admitted");
    Ok(())
}

fn check_supported(
    registry: &CapabilityRegistry,
    constraints: &Constraints,
) -> Result<(), AdmissionError> {
    let errors = unsupported_values(registry, constraints);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AdmissionError::Unsupported { errors })
    }
}

fn unsupported_values(registry: &CapabilityRegistry, constraints: &Constraints) -> Vec<String> {
    // Collect rather than short-circuit so one report covers every bad value.
    let mut errors = Vec::new();
    for zone in &constraints.zones {
        if !registry.supports_zone(zone) {
            errors.push(format!("zone '{zone}' is not supported"));
        }
    }
    for name in &constraints.instance_types {
        if !registry.supports_instance_type(name) {
            errors.push(format!("instance type '{name}' is not supported"));
        }
    }
    for architecture in &constraints.architectures {
        if !registry.supports_architecture(architecture) {
            errors.push(format!("architecture '{architecture}' is not supported"));
        }
    }
    for operating_system in &constraints.operating_systems {
        if !registry.supports_operating_system(operating_system) {
            errors.push(format!(
                "operating system '{operating_system}' is not supported"
            ));
        }
    }
    errors
}
