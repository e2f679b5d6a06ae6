//! # warden-discover
//!
//! Directory discovery pipeline for the warden permission tree.
//!
//! ## Overview
//!
//! This crate provides [`Discoverer`], which scans a base directory and
//! populates a `ModuleRegistry`: every subdirectory becomes a nested module,
//! every matching file becomes an object, and every method the configured
//! introspector reports becomes a permission entry seeded with the profiles
//! its metadata declares. Permission declarations thus live next to the code
//! they protect instead of in a separate configuration file.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use warden_discover::{Discoverer, ScriptFilter};
//! use warden_manifest::ManifestIntrospector;
//!
//! let introspector = ManifestIntrospector::new();
//! let discovery = Discoverer::new("scripts")
//!     .with_filter(ScriptFilter::Extension("toml".to_string()))
//!     .run(&introspector, &introspector)?;
//! // discovery.root is ready for authorization queries.
//! ```
//!
//! ## Failure model
//!
//! The build is all-or-nothing: the first duplicate name, unreadable
//! directory, or introspection failure aborts the run and the partial tree
//! is discarded. Entries are visited sorted by file name, so the first error
//! for a given tree is deterministic.

pub mod config;
pub mod pipeline;

pub use config::{Discoverer, Naming, ScriptFilter, StemNaming};
pub use pipeline::{DiscoverReport, Discovery};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use warden_contracts::{
        error::{WardenError, WardenResult},
        introspect::MethodDecl,
        profile::Profile,
        route::Route,
    };
    use warden_core::traits::{AnnotationReader, ClassIntrospector};
    use warden_manifest::ManifestIntrospector;

    use crate::{Discoverer, ScriptFilter};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A static registration table: class name → declared methods with their
    /// attached profiles. Stands in for runtime reflection.
    #[derive(Default)]
    struct TableIntrospector {
        classes: HashMap<String, Vec<(MethodDecl, Vec<Profile>)>>,
    }

    impl TableIntrospector {
        fn with_class(mut self, class: &str, methods: &[(&str, usize, &[&str])]) -> Self {
            self.classes.insert(
                class.to_string(),
                methods
                    .iter()
                    .map(|(name, arity, profiles)| {
                        (
                            MethodDecl::new(*name, *arity),
                            profiles.iter().map(|p| Profile::new(*p)).collect(),
                        )
                    })
                    .collect(),
            );
            self
        }

        fn class(&self, script: &Path, class_name: &str) -> WardenResult<&Vec<(MethodDecl, Vec<Profile>)>> {
            self.classes
                .get(class_name)
                .ok_or_else(|| WardenError::Introspection {
                    location: script.display().to_string(),
                    reason: format!("class '{class_name}' is not registered"),
                })
        }
    }

    impl ClassIntrospector for TableIntrospector {
        fn declared_methods(
            &self,
            script: &Path,
            class_name: &str,
        ) -> WardenResult<Vec<MethodDecl>> {
            Ok(self
                .class(script, class_name)?
                .iter()
                .map(|(decl, _)| decl.clone())
                .collect())
        }
    }

    impl AnnotationReader for TableIntrospector {
        fn profiles(
            &self,
            script: &Path,
            class_name: &str,
            method: &str,
        ) -> WardenResult<Vec<Profile>> {
            let methods = self.class(script, class_name)?;
            let entry = methods
                .iter()
                .find(|(decl, _)| decl.name == method)
                .ok_or_else(|| WardenError::Introspection {
                    location: script.display().to_string(),
                    reason: format!("method '{method}' is not registered on '{class_name}'"),
                })?;
            Ok(entry.1.clone())
        }
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn route(base: &Path, modules: &[&str], object: &str, method: &str) -> Route {
        Route::new(
            base,
            format!("{object}.script"),
            object,
            method,
            modules.iter().map(|m| m.to_string()).collect(),
        )
        .unwrap()
    }

    // ── Structure ─────────────────────────────────────────────────────────────

    /// Subdirectories become nested modules; files become objects with the
    /// methods and profiles their metadata declares.
    #[test]
    fn builds_modules_objects_and_methods() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("billing")).unwrap();
        touch(&dir.path().join("billing"), "Invoices.script");

        let introspector = TableIntrospector::default()
            .with_class("Invoices", &[("send", 2, &["finance"])]);

        let discovery = Discoverer::new(dir.path())
            .run(&introspector, &introspector)
            .unwrap();

        assert_eq!(discovery.report.modules, 1);
        assert_eq!(discovery.report.objects, 1);
        assert_eq!(discovery.report.methods, 1);

        let billing = discovery.root.nested_module("billing").unwrap();
        assert!(billing.object("Invoices").unwrap().has_method("send"));
    }

    /// The end-to-end scenario: root/billing/Invoices with method `send`
    /// annotated ["finance"] answers queries exactly as declared.
    #[test]
    fn end_to_end_authorization_queries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("billing")).unwrap();
        touch(&dir.path().join("billing"), "Invoices.script");

        let introspector = TableIntrospector::default()
            .with_class("Invoices", &[("send", 1, &["finance"])]);

        let discovery = Discoverer::new(dir.path())
            .run(&introspector, &introspector)
            .unwrap();
        let tree = discovery.root;

        let send = route(dir.path(), &["billing"], "Invoices", "send");
        assert!(tree.can_be_executed_by(&send, &Profile::new("finance")).unwrap());
        assert!(!tree.can_be_executed_by(&send, &Profile::new("sales")).unwrap());

        // A route through a module that was never discovered is an error,
        // not a denial.
        let via_hr = route(dir.path(), &["hr"], "Invoices", "send");
        match tree.can_be_executed_by(&via_hr, &Profile::new("finance")) {
            Err(WardenError::ModuleNotFound { name }) => assert_eq!(name, "hr"),
            other => panic!("expected ModuleNotFound, got {:?}", other),
        }
    }

    /// A file at the root becomes an object reachable with an empty module
    /// sequence.
    #[test]
    fn root_level_file_becomes_root_object() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Health.script");

        let introspector =
            TableIntrospector::default().with_class("Health", &[("ping", 0, &["ops"])]);

        let discovery = Discoverer::new(dir.path())
            .run(&introspector, &introspector)
            .unwrap();

        let ping = route(dir.path(), &[], "Health", "ping");
        assert!(discovery
            .root
            .can_be_executed_by(&ping, &Profile::new("ops"))
            .unwrap());
    }

    /// Empty subdirectories still become (empty) nested modules.
    #[test]
    fn empty_directory_becomes_empty_module() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("audit")).unwrap();

        let introspector = TableIntrospector::default();
        let discovery = Discoverer::new(dir.path())
            .run(&introspector, &introspector)
            .unwrap();

        let audit = discovery.root.nested_module("audit").unwrap();
        assert_eq!(audit.objects().count(), 0);
        assert_eq!(discovery.report.modules, 1);
        assert_eq!(discovery.report.objects, 0);
    }

    // ── Filtering ─────────────────────────────────────────────────────────────

    /// Files not matching the filter are skipped silently, at every depth.
    #[test]
    fn filter_skips_non_matching_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Invoices.script");
        touch(dir.path(), "README.md");
        fs::create_dir(dir.path().join("billing")).unwrap();
        touch(&dir.path().join("billing"), "notes.txt");

        let introspector = TableIntrospector::default()
            .with_class("Invoices", &[("send", 0, &["finance"])]);

        let discovery = Discoverer::new(dir.path())
            .with_filter(ScriptFilter::Extension("script".to_string()))
            .run(&introspector, &introspector)
            .unwrap();

        assert_eq!(discovery.report.objects, 1);
        assert!(discovery.root.has_object("Invoices"));
        assert!(!discovery.root.has_object("README"));
        assert!(!discovery
            .root
            .nested_module("billing")
            .unwrap()
            .has_object("notes"));
    }

    // ── Failure model ─────────────────────────────────────────────────────────

    /// An introspection failure anywhere aborts the whole build.
    #[test]
    fn introspection_error_aborts_build() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Known.script");
        touch(dir.path(), "Unknown.script");

        // Only "Known" is registered; "Unknown" makes the introspector fail.
        let introspector =
            TableIntrospector::default().with_class("Known", &[("run", 0, &["ops"])]);

        let result = Discoverer::new(dir.path()).run(&introspector, &introspector);

        match result {
            Err(WardenError::Introspection { reason, .. }) => {
                assert!(reason.contains("Unknown"), "unexpected reason: {reason}");
            }
            other => panic!("expected Introspection error, got {:?}", other),
        }
    }

    /// A nonexistent root directory fails the scan rather than yielding an
    /// empty tree.
    #[test]
    fn missing_root_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let introspector = TableIntrospector::default();
        let result = Discoverer::new(&missing).run(&introspector, &introspector);

        assert!(matches!(result, Err(WardenError::Scan { .. })));
    }

    // ── Manifest round-trip ───────────────────────────────────────────────────

    /// Building from TOML manifests: one file exposing `bar` annotated with
    /// ["admin", "ops"] authorizes ops and rejects guest.
    #[test]
    fn manifest_round_trip() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Foo.toml"),
            r#"
                class = "Foo"

                [[methods]]
                name = "bar"
                profiles = ["admin", "ops"]
            "#,
        )
        .unwrap();

        let introspector = ManifestIntrospector::new();
        let discovery = Discoverer::new(dir.path())
            .with_filter(ScriptFilter::Extension("toml".to_string()))
            .run(&introspector, &introspector)
            .unwrap();

        let bar = Route::new(dir.path(), "Foo.toml", "Foo", "bar", Vec::new()).unwrap();
        assert!(discovery
            .root
            .can_be_executed_by(&bar, &Profile::new("ops"))
            .unwrap());
        assert!(!discovery
            .root
            .can_be_executed_by(&bar, &Profile::new("guest"))
            .unwrap());
    }

    /// A malformed manifest fails the build with a configuration error.
    #[test]
    fn malformed_manifest_aborts_build() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Broken.toml"), "this is not valid toml ][[[").unwrap();

        let introspector = ManifestIntrospector::new();
        let result = Discoverer::new(dir.path())
            .with_filter(ScriptFilter::Extension("toml".to_string()))
            .run(&introspector, &introspector);

        assert!(matches!(result, Err(WardenError::Config { .. })));
    }
}
