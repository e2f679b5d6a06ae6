//! # warden-manifest
//!
//! TOML manifest implementation of the warden introspection and loading
//! capabilities.
//!
//! ## Overview
//!
//! The permission core depends on three narrow seams — class introspection,
//! annotation reading, and script loading — and never implements them. This
//! crate satisfies all three from TOML manifest files: static registration
//! tables that play the role runtime reflection plays in dynamic hosts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warden_manifest::{ManifestIntrospector, ManifestLoader};
//!
//! let introspector = ManifestIntrospector::new();
//! let discovery = Discoverer::new("scripts")
//!     .with_filter(ScriptFilter::Extension("toml".to_string()))
//!     .run(&introspector, &introspector)?;
//!
//! let executor = Executor::new(Box::new(ManifestLoader::new()));
//! executor.execute(&discovery.root, &route, &profile, &args)?;
//! ```

pub mod introspect;
pub mod loader;
pub mod schema;

pub use introspect::ManifestIntrospector;
pub use loader::{LoadedManifest, ManifestLoader};
pub use schema::{MethodManifest, ObjectManifest};

// ── Tests ─────────────────────────────────────────────────────────────────────
