//! Discovery configuration: which files count as objects, and how scripts
//! map to class and object names.

use std::path::{Path, PathBuf};

/// Restricts which files under the discovery root are treated as objects.
///
/// Files that do not match are skipped silently; directories are always
/// descended into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptFilter {
    /// Only files with exactly this name (e.g. `"permissions.toml"`).
    FileName(String),
    /// Only files with this extension, without the dot (e.g. `"toml"`).
    Extension(String),
}

impl ScriptFilter {
    /// Return true if `path` should be treated as an object script.
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::FileName(name) => {
                path.file_name().and_then(|n| n.to_str()) == Some(name.as_str())
            }
            Self::Extension(ext) => {
                path.extension().and_then(|e| e.to_str()) == Some(ext.as_str())
            }
        }
    }
}

/// Derives class and object names from a script path.
///
/// The class name is what the introspector is asked about; the object name
/// is what the object is registered under in the tree. By default they are
/// the same.
pub trait Naming: Send + Sync {
    /// The class name to introspect for the object backed by `script`.
    fn class_name(&self, script: &Path) -> String;

    /// The name the object is registered under; defaults to the class name.
    fn object_name(&self, script: &Path) -> String {
        self.class_name(script)
    }
}

/// Derives both names from the script's file stem: `billing/Invoices.toml`
/// yields class and object `Invoices`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StemNaming;

impl Naming for StemNaming {
    fn class_name(&self, script: &Path) -> String {
        script
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// The discovery configuration bundle.
///
/// Build one with [`Discoverer::new`], optionally narrowing it with
/// [`with_filter`](Discoverer::with_filter) and
/// [`with_naming`](Discoverer::with_naming), then call
/// [`run`](Discoverer::run) with the introspection capabilities.
pub struct Discoverer {
    pub(crate) root: PathBuf,
    pub(crate) filter: Option<ScriptFilter>,
    pub(crate) naming: Box<dyn Naming>,
}

impl Discoverer {
    /// Configure a discovery over the directory `root`.
    ///
    /// Without a filter, every file is treated as an object script; naming
    /// defaults to [`StemNaming`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: None,
            naming: Box::new(StemNaming),
        }
    }

    /// Only treat files matching `filter` as object scripts.
    pub fn with_filter(mut self, filter: ScriptFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Replace the naming scheme.
    pub fn with_naming(mut self, naming: Box<dyn Naming>) -> Self {
        self.naming = naming;
        self
    }

    /// The configured discovery root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_filter_matches_exactly() {
        let filter = ScriptFilter::FileName("permissions.toml".to_string());

        assert!(filter.matches(Path::new("a/b/permissions.toml")));
        assert!(!filter.matches(Path::new("a/b/other.toml")));
        assert!(!filter.matches(Path::new("a/permissions.toml.bak")));
    }

    #[test]
    fn extension_filter_matches_any_stem() {
        let filter = ScriptFilter::Extension("toml".to_string());

        assert!(filter.matches(Path::new("a/Invoices.toml")));
        assert!(filter.matches(Path::new("b/Ledger.toml")));
        assert!(!filter.matches(Path::new("a/notes.txt")));
        assert!(!filter.matches(Path::new("a/toml")));
    }

    #[test]
    fn stem_naming_uses_the_file_stem() {
        let naming = StemNaming;

        assert_eq!(naming.class_name(Path::new("billing/Invoices.toml")), "Invoices");
        assert_eq!(naming.object_name(Path::new("billing/Invoices.toml")), "Invoices");
    }
}
