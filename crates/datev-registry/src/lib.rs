//! DATEV Registry: discovery, cached lookups and cross-version analysis
//!
//! ```text
//! RegistrationTable ──▶ Discovery (Catalog) ──▶ Registry (Arc cache) ──▶ Manager
//! ```
//!
//! Discovery never raises on a broken version module; it records
//! [`datev_core::StructuralIssue`]s and leaves the version unsupported.
//! The registry raises typed errors only at lookup time.

pub mod compat;
pub mod discovery;
pub mod manager;
pub mod migration;
pub mod registry;

pub use compat::CompatMatrix;
pub use discovery::{Catalog, Discovery, FormatHandle, VersionDetails, VersionEntry};
pub use manager::{FormatSize, Manager, VersionOverview, VersionSummary, VersionValidation};
pub use migration::{FieldDiff, FieldMove, MigrationPlan};
pub use registry::Registry;
