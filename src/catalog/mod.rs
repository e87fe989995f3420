//! Static instance-type catalog wiring.
//!
//! This module wraps the JSON catalog format described by
//! `schema/instance_type_catalog.schema.json` so startup code can load a
//! validated catalog and serve it through the `CloudProvider` contract.
//! `StaticProvider` is the file-backed provider; the other types mirror the
//! schema fields.

pub mod identity;
pub mod loader;
pub mod model;
pub mod static_provider;

pub use identity::{CatalogVersion, ProviderName};
pub use model::{InstanceTypeCatalog, InstanceTypeEntry};
pub use static_provider::StaticProvider;
