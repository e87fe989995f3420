//! Serializable provisioning constraints handed to the validation hooks.
//!
//! The shapes are deliberately provider-neutral: well-known requirement lists
//! that the registry can check against its published sets, free-form labels,
//! and an opaque `provider` blob that only the provider's own validator
//! interprets.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Scheduling constraints requested by a user.
///
/// Empty requirement lists mean "no restriction".
pub struct Constraints {
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub instance_types: Vec<String>,
    #[serde(default)]
    pub architectures: Vec<String>,
    #[serde(default)]
    pub operating_systems: Vec<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Resource spec for a provisioner: constraints plus node lifetime settings.
pub struct ProvisionerSpec {
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds_after_empty: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds_until_expired: Option<u64>,
}
