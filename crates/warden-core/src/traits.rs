//! Capability contracts the permission core depends on.
//!
//! Three narrow seams keep class inspection and script loading out of the
//! core:
//!
//! - `ClassIntrospector` — "which methods does this class declare?"
//! - `AnnotationReader`  — "which profiles are attached to this method?"
//! - `ScriptLoader` / `LoadedScript` — resolve and invoke the backing callable
//!
//! The core never implements these. The warden-manifest crate satisfies them
//! with static registration tables parsed from TOML manifests; tests use
//! in-memory stand-ins. Whatever the implementation, the contract is the
//! same: given a class identifier at a location, return its declared methods
//! and each one's attached profile list.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use warden_contracts::{error::WardenResult, introspect::MethodDecl, profile::Profile};

/// Enumerates the declared methods of a class found at a given location.
pub trait ClassIntrospector: Send + Sync {
    /// Return the methods the class `class_name` declares in `script`.
    ///
    /// An unreadable script or a class that cannot be found is an
    /// `Introspection` error — discovery treats it as fatal for the build.
    fn declared_methods(&self, script: &Path, class_name: &str) -> WardenResult<Vec<MethodDecl>>;
}

/// Reads the profile-list metadata attached to a declared method.
pub trait AnnotationReader: Send + Sync {
    /// Return the profiles attached to `method` of `class_name` in `script`.
    ///
    /// A method with no attached metadata yields an empty list — the method
    /// then exists in the tree but no profile may invoke it.
    fn profiles(&self, script: &Path, class_name: &str, method: &str)
        -> WardenResult<Vec<Profile>>;
}

/// Resolves the backing callable for a script path.
///
/// Loaders are only consulted after an authorization check has passed; the
/// executor's cache guarantees at most one load per path.
pub trait ScriptLoader: Send + Sync {
    /// Load the script at `path`.
    fn load(&self, path: &Path) -> WardenResult<Arc<dyn LoadedScript>>;
}

/// A loaded script whose object methods can be invoked.
pub trait LoadedScript: Send + Sync {
    /// Invoke `method` on `object` with `args`, returning its result.
    fn call(&self, object: &str, method: &str, args: &[Value]) -> WardenResult<Value>;

    /// Number of arguments `method` on `object` declares.
    ///
    /// Used by the checked execution path to reject calls with the wrong
    /// argument count before the method runs.
    fn arity(&self, object: &str, method: &str) -> WardenResult<usize>;
}
