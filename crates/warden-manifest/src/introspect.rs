//! Manifest-backed introspection.
//!
//! `ManifestIntrospector` satisfies both `ClassIntrospector` and
//! `AnnotationReader` by reading the manifest at the script path — a static
//! registration table in place of runtime reflection. Discovery happens once
//! at process start, so the manifest is simply re-read per query.

use std::path::Path;

use tracing::debug;

use warden_contracts::{
    error::{WardenError, WardenResult},
    introspect::MethodDecl,
    profile::Profile,
};
use warden_core::traits::{AnnotationReader, ClassIntrospector};

use crate::schema::ObjectManifest;

/// Reads object manifests as the source of method and profile metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestIntrospector;

impl ManifestIntrospector {
    /// Create a manifest introspector.
    pub fn new() -> Self {
        Self
    }

    /// Load the manifest at `script` and check it describes `class_name`.
    ///
    /// A manifest that declares a different class is an introspection error,
    /// the same way reflection fails when a class is absent from a script.
    fn manifest_for(&self, script: &Path, class_name: &str) -> WardenResult<ObjectManifest> {
        let manifest = ObjectManifest::from_file(script)?;

        if let Some(declared) = &manifest.class {
            if declared != class_name {
                return Err(WardenError::Introspection {
                    location: script.display().to_string(),
                    reason: format!(
                        "manifest declares class '{declared}', expected '{class_name}'"
                    ),
                });
            }
        }

        Ok(manifest)
    }
}

impl ClassIntrospector for ManifestIntrospector {
    fn declared_methods(&self, script: &Path, class_name: &str) -> WardenResult<Vec<MethodDecl>> {
        let manifest = self.manifest_for(script, class_name)?;

        debug!(
            script = %script.display(),
            class = %class_name,
            methods = manifest.methods.len(),
            "manifest introspected"
        );

        Ok(manifest
            .methods
            .iter()
            .map(|m| MethodDecl::new(m.name.as_str(), m.arity))
            .collect())
    }
}

impl AnnotationReader for ManifestIntrospector {
    fn profiles(
        &self,
        script: &Path,
        class_name: &str,
        method: &str,
    ) -> WardenResult<Vec<Profile>> {
        let manifest = self.manifest_for(script, class_name)?;

        let entry = manifest
            .method(method)
            .ok_or_else(|| WardenError::MethodNotFound {
                name: method.to_string(),
                object: class_name.to_string(),
            })?;

        Ok(entry.profiles.iter().map(|p| Profile::new(p.as_str())).collect())
    }
}
