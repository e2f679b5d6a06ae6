//! The discovery pipeline: scan a directory, populate a permission tree.
//!
//! Every subdirectory becomes a nested module; every matching file becomes
//! an object whose methods — and their attached profiles — are read through
//! the introspection capabilities. The walk is depth-first with entries
//! sorted by file name, so a malformed tree always reports the same first
//! error. Any error anywhere aborts the whole build: a partially populated
//! root is never returned.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;
use walkdir::WalkDir;

use warden_contracts::error::{WardenError, WardenResult};
use warden_core::{
    traits::{AnnotationReader, ClassIntrospector},
    ModuleRegistry,
};

use crate::config::Discoverer;

/// Summary of one discovery run.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoverReport {
    /// Identifies this build in logs.
    pub build_id: Uuid,
    /// Wall-clock completion time (UTC).
    pub built_at: DateTime<Utc>,
    /// Nested modules created, across all depths.
    pub modules: usize,
    /// Objects created.
    pub objects: usize,
    /// Method entries created.
    pub methods: usize,
}

/// A fully populated permission tree plus its build summary.
#[derive(Debug)]
pub struct Discovery {
    /// The tree root, ready for authorization queries.
    pub root: ModuleRegistry,
    /// Counts and identifiers for the completed build.
    pub report: DiscoverReport,
}

#[derive(Default)]
struct Counts {
    modules: usize,
    objects: usize,
    methods: usize,
}

impl Discoverer {
    /// Scan the configured root and build the permission tree.
    ///
    /// Fails on the first structural problem — a duplicate name, an
    /// unreadable directory, an introspection error — and discards whatever
    /// was built up to that point.
    pub fn run(
        &self,
        introspector: &dyn ClassIntrospector,
        annotations: &dyn AnnotationReader,
    ) -> WardenResult<Discovery> {
        let build_id = Uuid::new_v4();
        info!(
            build_id = %build_id,
            root = %self.root.display(),
            "permission tree build starting"
        );

        let mut tree = ModuleRegistry::root();
        let mut counts = Counts::default();
        self.populate(&mut tree, &self.root, introspector, annotations, &mut counts)?;

        let report = DiscoverReport {
            build_id,
            built_at: Utc::now(),
            modules: counts.modules,
            objects: counts.objects,
            methods: counts.methods,
        };

        info!(
            build_id = %build_id,
            modules = report.modules,
            objects = report.objects,
            methods = report.methods,
            "permission tree build complete"
        );

        Ok(Discovery { root: tree, report })
    }

    /// Populate `node` from one directory level, recursing into
    /// subdirectories.
    fn populate(
        &self,
        node: &mut ModuleRegistry,
        dir: &Path,
        introspector: &dyn ClassIntrospector,
        annotations: &dyn AnnotationReader,
        counts: &mut Counts,
    ) -> WardenResult<()> {
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in entries {
            let entry = entry.map_err(|e| WardenError::Scan {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            let name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| WardenError::Scan {
                    path: path.display().to_string(),
                    reason: "entry name is not valid UTF-8".to_string(),
                })?
                .to_string();

            if entry.file_type().is_dir() {
                debug!(module = %name, "descending into module directory");
                let nested = node.create_nested_module(name.as_str())?;
                counts.modules += 1;
                self.populate(nested, path, introspector, annotations, counts)?;
                continue;
            }

            if let Some(filter) = &self.filter {
                if !filter.matches(path) {
                    continue;
                }
            }

            let class_name = self.naming.class_name(path);
            let object_name = self.naming.object_name(path);

            let decls = introspector.declared_methods(path, &class_name)?;
            debug!(
                object = %object_name,
                class = %class_name,
                methods = decls.len(),
                script = %path.display(),
                "object discovered"
            );

            let object = node.create_object(object_name.as_str())?;
            counts.objects += 1;

            for decl in decls {
                let profiles = annotations.profiles(path, &class_name, &decl.name)?;
                object.create_method(decl.name, profiles)?;
                counts.methods += 1;
            }
        }

        Ok(())
    }
}
