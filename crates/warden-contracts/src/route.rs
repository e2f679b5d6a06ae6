//! Route descriptors.
//!
//! A `Route` is a fully qualified path through the permission tree: the
//! ordered module names to descend through, then an object name and a method
//! name. The same value also locates the backing script on disk via
//! [`Route::script_path`], so resolving an authorization query must never
//! consume it — all accessors borrow, and the tree walks the module sequence
//! through a borrowed cursor.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{WardenError, WardenResult};

/// An immutable descriptor of where to go in the permission tree.
///
/// Routes are cheap, short-lived values built once per authorization query.
/// Construction validates every required field; a partial route is never
/// observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    base_dir: PathBuf,
    script_name: String,
    object_name: String,
    method_name: String,
    modules: Vec<String>,
}

impl Route {
    /// Build a route.
    ///
    /// `modules` may be empty (the object hangs directly off the root), but
    /// `base_dir`, `script_name`, `object_name` and `method_name` must all be
    /// non-empty. Returns `WardenError::InvalidRoute` otherwise.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        script_name: impl Into<String>,
        object_name: impl Into<String>,
        method_name: impl Into<String>,
        modules: Vec<String>,
    ) -> WardenResult<Self> {
        let base_dir = base_dir.into();
        let script_name = script_name.into();
        let object_name = object_name.into();
        let method_name = method_name.into();

        if base_dir.as_os_str().is_empty() {
            return Err(WardenError::InvalidRoute {
                reason: "base directory is not defined".to_string(),
            });
        }
        if script_name.is_empty() {
            return Err(WardenError::InvalidRoute {
                reason: "script name is not defined".to_string(),
            });
        }
        if object_name.is_empty() {
            return Err(WardenError::InvalidRoute {
                reason: "object name is not defined".to_string(),
            });
        }
        if method_name.is_empty() {
            return Err(WardenError::InvalidRoute {
                reason: "method name is not defined".to_string(),
            });
        }

        Ok(Self {
            base_dir,
            script_name,
            object_name,
            method_name,
            modules,
        })
    }

    /// The directory the permission tree was built from.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File name of the backing script.
    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    /// Name of the object within the resolved module.
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Name of the method on the resolved object.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// The module names to descend through, outermost first.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// True if the route descends through at least one nested module.
    pub fn has_nested_modules(&self) -> bool {
        !self.modules.is_empty()
    }

    /// Filesystem location of the backing script: the base directory, the
    /// module names in order, then the script name.
    pub fn script_path(&self) -> PathBuf {
        let mut path = self.base_dir.clone();
        for module in &self.modules {
            path.push(module);
        }
        path.push(&self.script_name);
        path
    }
}
