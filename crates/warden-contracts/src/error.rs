//! Error types for the warden permission registry.
//!
//! All fallible operations across the warden crates return `WardenResult<T>`.
//! Lookup misses (`ModuleNotFound`, `ObjectNotFound`, `MethodNotFound`) are
//! deliberately distinct from `NotAuthorized`, so a caller can always tell
//! "this route does not resolve" apart from "this profile is not allowed".

use thiserror::Error;

/// The unified error type for the warden crates.
#[derive(Debug, Error)]
pub enum WardenError {
    /// A nested module with this name is already registered under the parent.
    ///
    /// Always a caller or configuration bug — duplicate inserts are never
    /// resolved by overwriting.
    #[error("module '{name}' already exists under '{parent}'")]
    DuplicateModule { name: String, parent: String },

    /// An object with this name is already registered under the parent module.
    #[error("object '{name}' already exists under '{parent}'")]
    DuplicateObject { name: String, parent: String },

    /// A method with this name is already registered on the object.
    #[error("method '{name}' already exists on object '{object}'")]
    DuplicateMethod { name: String, object: String },

    /// A route segment named a nested module that was never created.
    #[error("module '{name}' not found")]
    ModuleNotFound { name: String },

    /// A route named an object that was never created under the resolved module.
    #[error("object '{name}' not found")]
    ObjectNotFound { name: String },

    /// A route named a method that was never registered on the resolved object.
    #[error("method '{name}' not found on object '{object}'")]
    MethodNotFound { name: String, object: String },

    /// The profile is not in the method's allowed set.
    ///
    /// Carries nothing beyond the denied profile — the cause of a denial is
    /// never leaked to an external caller.
    #[error("profile '{profile}' is not authorized")]
    NotAuthorized { profile: String },

    /// A required route field was missing or empty at construction time.
    ///
    /// Routes fail fast: a partial route is never constructed.
    #[error("invalid route: {reason}")]
    InvalidRoute { reason: String },

    /// A class introspector or annotation reader failed during discovery.
    #[error("introspection failed for '{location}': {reason}")]
    Introspection { location: String, reason: String },

    /// The filesystem walk under the discovery root failed.
    #[error("directory scan failed at '{path}': {reason}")]
    Scan { path: String, reason: String },

    /// The backing script for a route could not be loaded.
    #[error("script load failed for '{path}': {reason}")]
    ScriptLoad { path: String, reason: String },

    /// The loaded script rejected the invocation.
    #[error("method invocation failed: {reason}")]
    Invocation { reason: String },

    /// The caller supplied a different number of arguments than the method declares.
    ///
    /// Only produced by the checked execution path.
    #[error("method '{method}' declares {expected} argument(s), {found} supplied")]
    ArityMismatch {
        method: String,
        expected: usize,
        found: usize,
    },

    /// A manifest or configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the warden crates.
pub type WardenResult<T> = Result<T, WardenError>;
