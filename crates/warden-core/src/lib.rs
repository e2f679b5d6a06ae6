//! # warden-core
//!
//! The permission tree and its trust seams.
//!
//! This crate provides:
//! - The registry tree: [`MethodPermission`] → [`ObjectRegistry`] →
//!   [`ModuleRegistry`], with the route resolution algorithm on the tree root
//! - The capability traits the core depends on but never implements
//!   (`ClassIntrospector`, `AnnotationReader`, `ScriptLoader`)
//! - The [`ScriptCache`] (at-most-one load per path) and the [`Executor`]
//!   that gates every invocation behind an authorization check
//!
//! The tree is built once at startup — by hand or through warden-discover —
//! and is read-mostly afterwards: `can_be_executed_by` takes `&self`, so
//! concurrent queries against a shared tree are safe by construction.

pub mod cache;
pub mod executor;
pub mod method;
pub mod module;
pub mod object;
pub mod traits;

pub use cache::ScriptCache;
pub use executor::Executor;
pub use method::MethodPermission;
pub use module::ModuleRegistry;
pub use object::ObjectRegistry;
