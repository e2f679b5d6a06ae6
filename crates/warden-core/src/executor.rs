//! Authorization-gated method invocation.
//!
//! The executor combines a permission tree query with lazy loading of the
//! backing script. The invariant is absolute: `LoadedScript::call` is never
//! reached unless `ModuleRegistry::can_be_executed_by` returned true for the
//! route and profile — the denial path returns before any load occurs, so a
//! denied caller cannot trigger side effects in a script that was never
//! meant to run for them.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use warden_contracts::{
    error::{WardenError, WardenResult},
    profile::Profile,
    route::Route,
};

use crate::{
    cache::ScriptCache,
    module::ModuleRegistry,
    traits::{LoadedScript, ScriptLoader},
};

/// Invokes methods behind the permission tree.
///
/// Owns the script loader and the process-wide script cache. One executor is
/// typically created at startup, next to the tree the discovery pipeline
/// produced, and shared for the process lifetime.
pub struct Executor {
    loader: Box<dyn ScriptLoader>,
    cache: ScriptCache,
}

impl Executor {
    /// Create an executor around the given loader with an empty cache.
    pub fn new(loader: Box<dyn ScriptLoader>) -> Self {
        Self {
            loader,
            cache: ScriptCache::new(),
        }
    }

    /// Invoke the method `route` points at with `args`, if `profile` may.
    ///
    /// Resolution errors (unknown module, object, or method) propagate as
    /// themselves. A resolved-but-disallowed query fails with
    /// `NotAuthorized`, which carries nothing beyond the denied profile.
    /// The backing script is loaded — at most once per path — strictly after
    /// the authorization check passes.
    pub fn execute(
        &self,
        tree: &ModuleRegistry,
        route: &Route,
        profile: &Profile,
        args: &[Value],
    ) -> WardenResult<Value> {
        let script = self.authorize_and_load(tree, route, profile)?;
        script.call(route.object_name(), route.method_name(), args)
    }

    /// Like [`execute`](Self::execute), but additionally requires the caller
    /// to supply exactly the number of arguments the method declares.
    pub fn execute_checked(
        &self,
        tree: &ModuleRegistry,
        route: &Route,
        profile: &Profile,
        args: &[Value],
    ) -> WardenResult<Value> {
        let script = self.authorize_and_load(tree, route, profile)?;

        let expected = script.arity(route.object_name(), route.method_name())?;
        if args.len() != expected {
            return Err(WardenError::ArityMismatch {
                method: route.method_name().to_string(),
                expected,
                found: args.len(),
            });
        }

        script.call(route.object_name(), route.method_name(), args)
    }

    /// The script cache, for observability.
    pub fn cache(&self) -> &ScriptCache {
        &self.cache
    }

    /// The shared gate: authorize first, load second.
    ///
    /// This is the only place a script load is initiated, and it is only
    /// reachable once the tree has answered true.
    fn authorize_and_load(
        &self,
        tree: &ModuleRegistry,
        route: &Route,
        profile: &Profile,
    ) -> WardenResult<Arc<dyn LoadedScript>> {
        if !tree.can_be_executed_by(route, profile)? {
            warn!(
                profile = %profile.as_str(),
                object = %route.object_name(),
                method = %route.method_name(),
                "invocation denied"
            );
            return Err(WardenError::NotAuthorized {
                profile: profile.as_str().to_string(),
            });
        }

        let path = route.script_path();
        debug!(
            profile = %profile.as_str(),
            path = %path.display(),
            "invocation authorized, resolving script"
        );
        self.cache.get_or_load(&path, self.loader.as_ref())
    }
}
