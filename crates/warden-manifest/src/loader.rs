//! Manifest-backed script loading and invocation.
//!
//! A "loaded script" in the manifest model is the parsed manifest itself:
//! invoking a method returns its declared static payload. This gives the
//! executor a complete reference implementation of the loading seam —
//! applications with real callables implement `ScriptLoader` against their
//! own runtime instead.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use warden_contracts::error::{WardenError, WardenResult};
use warden_core::traits::{LoadedScript, ScriptLoader};

use crate::schema::{MethodManifest, ObjectManifest};

/// Loads object manifests as invocable scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestLoader;

impl ManifestLoader {
    /// Create a manifest loader.
    pub fn new() -> Self {
        Self
    }
}

impl ScriptLoader for ManifestLoader {
    fn load(&self, path: &Path) -> WardenResult<Arc<dyn LoadedScript>> {
        let manifest = ObjectManifest::from_file(path).map_err(|e| WardenError::ScriptLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        // The object answers to its declared class name, or to the file stem
        // when the manifest leaves the class implicit — the same default the
        // discovery naming scheme uses.
        let object = match &manifest.class {
            Some(class) => class.clone(),
            None => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string(),
        };

        debug!(path = %path.display(), object = %object, "manifest script loaded");

        Ok(Arc::new(LoadedManifest { object, manifest }))
    }
}

/// A parsed manifest acting as the backing callable.
pub struct LoadedManifest {
    object: String,
    manifest: ObjectManifest,
}

impl LoadedManifest {
    fn method(&self, object: &str, method: &str) -> WardenResult<&MethodManifest> {
        if object != self.object {
            return Err(WardenError::ObjectNotFound {
                name: object.to_string(),
            });
        }
        self.manifest
            .method(method)
            .ok_or_else(|| WardenError::MethodNotFound {
                name: method.to_string(),
                object: object.to_string(),
            })
    }
}

impl LoadedScript for LoadedManifest {
    fn call(&self, object: &str, method: &str, args: &[Value]) -> WardenResult<Value> {
        let entry = self.method(object, method)?;

        debug!(
            object = %object,
            method = %method,
            args = args.len(),
            "manifest method invoked"
        );

        Ok(entry.returns.clone().unwrap_or(Value::Null))
    }

    fn arity(&self, object: &str, method: &str) -> WardenResult<usize> {
        Ok(self.method(object, method)?.arity)
    }
}
