//! Startup-style entry point: register a static catalog and report the result.
//!
//! Loads the instance-type catalog, registers it into a fresh capability
//! registry, optionally admits a constraints or spec document against it, and
//! prints the registry snapshot as JSON on stdout. Any registration failure
//! aborts with a non-zero exit status; a registry is never printed from a
//! failed registration.

use anyhow::{Context, Result, bail};
use capability_registrar::{
    CapabilityRegistry, Constraints, ProvisionerSpec, StaticProvider, admit_constraints,
    admit_spec, logging::init_logging, resolve_catalog_path,
};
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let catalog_path = resolve_catalog_path(cli.catalog.as_deref())?;

    let provider = Arc::new(StaticProvider::load(&catalog_path)?);
    let registry = CapabilityRegistry::from_provider(provider)
        .with_context(|| format!("registering catalog {}", catalog_path.display()))?;

    if let Some(path) = cli.constraints.as_deref() {
        let constraints: Constraints = read_json(path)?;
        admit_constraints(&registry, &constraints)
            .with_context(|| format!("constraints {} not admitted", path.display()))?;
    }
    if let Some(path) = cli.spec.as_deref() {
        let spec: ProvisionerSpec = read_json(path)?;
        admit_spec(&registry, &spec)
            .with_context(|| format!("spec {} not admitted", path.display()))?;
    }

    let rendered = serde_json::to_string_pretty(&registry.snapshot())?;
    println!("{rendered}");
    Ok(())
}

struct Cli {
    catalog: Option<PathBuf>,
    constraints: Option<PathBuf>,
    spec: Option<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut cli = Cli {
            catalog: None,
            constraints: None,
            spec: None,
        };

        while let Some(arg) = args.next() {
            let flag = arg
                .to_str()
                .with_context(|| "Invalid UTF-8 in command flag")?;
            let slot = match flag {
                "--catalog" => &mut cli.catalog,
                "--constraints" => &mut cli.constraints,
                "--spec" => &mut cli.spec,
                "--help" | "-h" => usage(0),
                other => bail!("Unknown argument: {other}"),
            };
            let Some(value) = args.next() else {
                bail!("{flag} requires a path");
            };
            *slot = Some(PathBuf::from(value));
        }

        Ok(cli)
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: capability-report [--catalog PATH] [--constraints PATH] [--spec PATH]\n\nOptions:\n  --catalog PATH       Instance-type catalog to register (default: $CAPABILITY_CATALOG, then the bundled catalog).\n  --constraints PATH   Constraints JSON to admit against the registry.\n  --spec PATH          Provisioner spec JSON to admit against the registry.\n\nSet RUST_LOG=capability_registrar=info to log registration details on stderr."
    );
    std::process::exit(code);
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}
