//! Script cache with at-most-one load per path.
//!
//! Loaded scripts are shared process-wide, keyed by resolved script path.
//! The cache is an explicit object with a defined lifecycle — created once
//! and owned by the [`Executor`](crate::executor::Executor) — rather than
//! implicit module-level state.
//!
//! `get_or_load` resolves a per-key cell outside the map lock, so concurrent
//! callers for the same path share a single load: the second caller blocks
//! on the first caller's cell instead of starting its own load. A failed
//! load leaves the cell empty, so a later call may retry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use tracing::debug;

use warden_contracts::error::{WardenError, WardenResult};

use crate::traits::{LoadedScript, ScriptLoader};

type Slot = Arc<OnceCell<Arc<dyn LoadedScript>>>;

/// Process-wide cache of loaded scripts.
#[derive(Default)]
pub struct ScriptCache {
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl ScriptCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the script loaded from `path`, loading it on first use.
    ///
    /// At most one successful load happens per path; concurrent callers for
    /// the same path reuse the first caller's result. Loader failures are
    /// returned to the caller and do not poison the slot.
    pub fn get_or_load(
        &self,
        path: &Path,
        loader: &dyn ScriptLoader,
    ) -> WardenResult<Arc<dyn LoadedScript>> {
        // Hold the map lock only long enough to fetch or insert the slot —
        // the load itself runs outside it.
        let slot = {
            let mut slots = self.slots.lock().map_err(|e| WardenError::ScriptLoad {
                path: path.display().to_string(),
                reason: format!("cache lock poisoned: {e}"),
            })?;
            Arc::clone(slots.entry(path.to_path_buf()).or_default())
        };

        let script = slot.get_or_try_init(|| {
            debug!(path = %path.display(), "loading script");
            loader.load(path)
        })?;

        Ok(Arc::clone(script))
    }

    /// Number of paths with a completed load.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().expect("script cache lock poisoned");
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    /// True if no script has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value;

    use super::*;

    /// A loader that counts its invocations and can be told to fail.
    struct CountingLoader {
        loads: AtomicUsize,
        fail_first: AtomicUsize,
    }

    impl CountingLoader {
        fn new() -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail_first: AtomicUsize::new(0),
            }
        }

        fn failing_once() -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail_first: AtomicUsize::new(1),
            }
        }

        fn load_count(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    struct NullScript;

    impl LoadedScript for NullScript {
        fn call(&self, _object: &str, _method: &str, _args: &[Value]) -> WardenResult<Value> {
            Ok(Value::Null)
        }

        fn arity(&self, _object: &str, _method: &str) -> WardenResult<usize> {
            Ok(0)
        }
    }

    impl ScriptLoader for CountingLoader {
        fn load(&self, path: &Path) -> WardenResult<Arc<dyn LoadedScript>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_first.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                n.checked_sub(1)
            }) == Ok(1)
            {
                return Err(WardenError::ScriptLoad {
                    path: path.display().to_string(),
                    reason: "injected failure".to_string(),
                });
            }
            Ok(Arc::new(NullScript))
        }
    }

    /// Repeated gets for one path trigger exactly one load.
    #[test]
    fn same_path_loads_once() {
        let cache = ScriptCache::new();
        let loader = CountingLoader::new();
        let path = Path::new("scripts/billing/Invoices.toml");

        cache.get_or_load(path, &loader).unwrap();
        cache.get_or_load(path, &loader).unwrap();
        cache.get_or_load(path, &loader).unwrap();

        assert_eq!(loader.load_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    /// Distinct paths each get their own load.
    #[test]
    fn distinct_paths_load_separately() {
        let cache = ScriptCache::new();
        let loader = CountingLoader::new();

        cache
            .get_or_load(Path::new("scripts/A.toml"), &loader)
            .unwrap();
        cache
            .get_or_load(Path::new("scripts/B.toml"), &loader)
            .unwrap();

        assert_eq!(loader.load_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    /// A failed load is surfaced and a later call retries successfully.
    #[test]
    fn failed_load_can_be_retried() {
        let cache = ScriptCache::new();
        let loader = CountingLoader::failing_once();
        let path = Path::new("scripts/A.toml");

        assert!(matches!(
            cache.get_or_load(path, &loader),
            Err(WardenError::ScriptLoad { .. })
        ));
        assert_eq!(cache.len(), 0);

        cache.get_or_load(path, &loader).unwrap();
        assert_eq!(loader.load_count(), 2);
        assert_eq!(cache.len(), 1);
    }

    /// Concurrent gets for the same path still produce a single load.
    #[test]
    fn concurrent_gets_share_one_load() {
        let cache = ScriptCache::new();
        let loader = CountingLoader::new();
        let path = Path::new("scripts/A.toml");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    cache.get_or_load(path, &loader).unwrap();
                });
            }
        });

        assert_eq!(loader.load_count(), 1);
    }
}
