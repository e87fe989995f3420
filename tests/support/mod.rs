#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use capability_registrar::{
    CloudProvider, ConstraintValidator, Constraints, InstanceType, InstanceTypeEntry,
    ProvisionerSpec, SpecValidator,
};
use serde_json::{Value, json};
use std::ffi::OsStr;
use std::io::Write;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

pub fn instance(name: &str, zones: &[&str], archs: &[&str], os: &[&str]) -> InstanceTypeEntry {
    let owned = |values: &[&str]| -> Vec<String> { values.iter().map(|v| v.to_string()).collect() };
    InstanceTypeEntry {
        name: name.to_string(),
        zones: owned(zones),
        architectures: owned(archs),
        operating_systems: owned(os),
    }
}

/// In-memory provider with scripted validator behavior and call recording.
pub struct FakeProvider {
    catalog: std::result::Result<Vec<InstanceTypeEntry>, String>,
    pub catalog_queries: AtomicUsize,
    pub constraint_calls: Mutex<Vec<Constraints>>,
    pub spec_calls: Mutex<Vec<ProvisionerSpec>>,
}

impl FakeProvider {
    pub fn with_catalog(entries: Vec<InstanceTypeEntry>) -> Self {
        Self {
            catalog: Ok(entries),
            catalog_queries: AtomicUsize::new(0),
            constraint_calls: Mutex::new(Vec::new()),
            spec_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            catalog: Err(message.to_string()),
            ..Self::with_catalog(Vec::new())
        }
    }

    pub fn queries(&self) -> usize {
        self.catalog_queries.load(Ordering::SeqCst)
    }
}

impl ConstraintValidator for FakeProvider {
    fn validate_constraints(&self, constraints: &Constraints) -> Result<()> {
        self.constraint_calls
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(constraints.clone());
        if let Some(team) = constraints.labels.get("team") {
            if team.is_empty() {
                bail!("label 'team' must not be empty");
            }
        }
        Ok(())
    }
}

impl SpecValidator for FakeProvider {
    fn validate_spec(&self, spec: &ProvisionerSpec) -> Result<()> {
        self.spec_calls
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(spec.clone());
        match (spec.ttl_seconds_after_empty, spec.ttl_seconds_until_expired) {
            (Some(empty), Some(expired)) if empty > expired => {
                bail!("ttl_seconds_after_empty ({empty}) exceeds ttl_seconds_until_expired ({expired})")
            }
            _ => Ok(()),
        }
    }
}

impl CloudProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn instance_types(&self) -> Result<Vec<Arc<dyn InstanceType>>> {
        self.catalog_queries.fetch_add(1, Ordering::SeqCst);
        match &self.catalog {
            Ok(entries) => Ok(entries
                .iter()
                .cloned()
                .map(|entry| Arc::new(entry) as Arc<dyn InstanceType>)
                .collect()),
            Err(message) => bail!("{message}"),
        }
    }
}

pub fn catalog_document(entries: &[InstanceTypeEntry]) -> Value {
    json!({
        "schema_version": "instance_type_catalog_v1",
        "provider": "static",
        "instance_types": entries,
    })
}

pub fn write_json(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate fixture file")?;
    serde_json::to_writer(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn report_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_capability-report"));
    cmd.env_remove("CAPABILITY_CATALOG");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn run_report<I, S>(args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = report_command();
    cmd.args(args);
    cmd.output()
        .with_context(|| format!("failed to run command: {:?}", cmd))
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    if !output.status.success() {
        bail!(
            "command failed: status {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    serde_json::from_slice(&output.stdout).context("stdout is not JSON")
}
