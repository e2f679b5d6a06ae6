//! Namespace nodes of the permission tree.
//!
//! A [`ModuleRegistry`] owns nested modules and objects under two separate
//! mappings, each with its own name uniqueness — a module and an object under
//! the same parent may share a name. The tree is acyclic by construction:
//! children are only ever created in place, never re-attached.
//!
//! The root of a tree is a nameless node created with [`ModuleRegistry::root`];
//! every lookup begins there. Resolving a [`Route`] walks a borrowed cursor
//! over the route's module-name sequence, so the route itself is never
//! consumed and stays valid for locating the backing script afterwards.

use std::collections::HashMap;

use tracing::debug;

use warden_contracts::{
    error::{WardenError, WardenResult},
    profile::Profile,
    route::Route,
};

use crate::{method::MethodPermission, object::ObjectRegistry};

/// A namespace node in the permission tree.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    name: String,
    nested: HashMap<String, ModuleRegistry>,
    objects: HashMap<String, ObjectRegistry>,
}

impl ModuleRegistry {
    /// Create the root of a permission tree. The root has no name.
    pub fn root() -> Self {
        Self::default()
    }

    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nested: HashMap::new(),
            objects: HashMap::new(),
        }
    }

    /// The module name; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Nested modules ───────────────────────────────────────────────────────

    /// Create a nested module under this node.
    ///
    /// Returns `WardenError::DuplicateModule` if the name is taken; the
    /// existing child is left untouched.
    pub fn create_nested_module(
        &mut self,
        name: impl Into<String>,
    ) -> WardenResult<&mut ModuleRegistry> {
        let name = name.into();
        if self.nested.contains_key(&name) {
            return Err(WardenError::DuplicateModule {
                name,
                parent: self.name.clone(),
            });
        }

        debug!(parent = %self.name, module = %name, "nested module registered");

        let module = ModuleRegistry::named(name.clone());
        Ok(self.nested.entry(name).or_insert(module))
    }

    /// Look up a nested module. Fails with `ModuleNotFound` if absent.
    pub fn nested_module(&self, name: &str) -> WardenResult<&ModuleRegistry> {
        self.nested.get(name).ok_or_else(|| WardenError::ModuleNotFound {
            name: name.to_string(),
        })
    }

    /// Mutable variant of [`nested_module`](Self::nested_module).
    pub fn nested_module_mut(&mut self, name: &str) -> WardenResult<&mut ModuleRegistry> {
        self.nested
            .get_mut(name)
            .ok_or_else(|| WardenError::ModuleNotFound {
                name: name.to_string(),
            })
    }

    /// True if a nested module with this name exists.
    pub fn has_nested_module(&self, name: &str) -> bool {
        self.nested.contains_key(name)
    }

    /// Remove a nested module and its whole subtree. Fails with
    /// `ModuleNotFound` if absent.
    pub fn remove_nested_module(&mut self, name: &str) -> WardenResult<()> {
        self.nested
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| WardenError::ModuleNotFound {
                name: name.to_string(),
            })
    }

    /// Remove every nested module. Clearing an empty mapping is a no-op.
    pub fn remove_all_nested_modules(&mut self) {
        self.nested.clear();
    }

    /// Iterate over the directly nested modules.
    pub fn nested_modules(&self) -> impl Iterator<Item = &ModuleRegistry> {
        self.nested.values()
    }

    // ── Objects ──────────────────────────────────────────────────────────────

    /// Create an object registry under this node.
    ///
    /// Returns `WardenError::DuplicateObject` if the name is taken.
    pub fn create_object(&mut self, name: impl Into<String>) -> WardenResult<&mut ObjectRegistry> {
        let name = name.into();
        if self.objects.contains_key(&name) {
            return Err(WardenError::DuplicateObject {
                name,
                parent: self.name.clone(),
            });
        }

        debug!(parent = %self.name, object = %name, "object registered");

        let object = ObjectRegistry::new(name.clone());
        Ok(self.objects.entry(name).or_insert(object))
    }

    /// Look up an object. Fails with `ObjectNotFound` if absent.
    pub fn object(&self, name: &str) -> WardenResult<&ObjectRegistry> {
        self.objects.get(name).ok_or_else(|| WardenError::ObjectNotFound {
            name: name.to_string(),
        })
    }

    /// Mutable variant of [`object`](Self::object).
    pub fn object_mut(&mut self, name: &str) -> WardenResult<&mut ObjectRegistry> {
        self.objects
            .get_mut(name)
            .ok_or_else(|| WardenError::ObjectNotFound {
                name: name.to_string(),
            })
    }

    /// True if an object with this name exists.
    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Remove an object and its method entries. Fails with `ObjectNotFound`
    /// if absent.
    pub fn remove_object(&mut self, name: &str) -> WardenResult<()> {
        self.objects
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| WardenError::ObjectNotFound {
                name: name.to_string(),
            })
    }

    /// Iterate over the objects registered directly under this node.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectRegistry> {
        self.objects.values()
    }

    // ── Method delegation ────────────────────────────────────────────────────

    /// Create a method on the named object, seeded with `profiles`.
    ///
    /// Resolves the object first, propagating `ObjectNotFound`, then
    /// delegates to `ObjectRegistry::create_method`.
    pub fn create_method<I>(
        &mut self,
        object: &str,
        method: impl Into<String>,
        profiles: I,
    ) -> WardenResult<&mut MethodPermission>
    where
        I: IntoIterator<Item = Profile>,
    {
        self.object_mut(object)?.create_method(method, profiles)
    }

    /// Look up a method entry on the named object.
    pub fn method(&self, object: &str, method: &str) -> WardenResult<&MethodPermission> {
        self.object(object)?.method(method)
    }

    /// True iff the named object declares the method. Propagates
    /// `ObjectNotFound` when the object itself is missing.
    pub fn has_method(&self, object: &str, method: &str) -> WardenResult<bool> {
        Ok(self.object(object)?.has_method(method))
    }

    /// Remove a method from the named object.
    pub fn remove_method(&mut self, object: &str, method: &str) -> WardenResult<()> {
        self.object_mut(object)?.remove_method(method)
    }

    /// Allow `profiles` on a method of the named object.
    pub fn allow<I>(&mut self, object: &str, method: &str, profiles: I) -> WardenResult<()>
    where
        I: IntoIterator<Item = Profile>,
    {
        self.object_mut(object)?.allow(method, profiles)
    }

    /// Withdraw `profiles` from a method of the named object.
    pub fn disallow<I>(&mut self, object: &str, method: &str, profiles: I) -> WardenResult<()>
    where
        I: IntoIterator<Item = Profile>,
    {
        self.object_mut(object)?.disallow(method, profiles)
    }

    // ── Resolution ───────────────────────────────────────────────────────────

    /// True iff `profile` may invoke the method `route` points at.
    ///
    /// Descends through the route's module names in order, starting at this
    /// node, then resolves the object and the method. Every segment must
    /// resolve exactly — a missing module, object, or method propagates as
    /// its own error, never as a false authorization result. The route is
    /// read through a borrowed cursor and is never mutated.
    pub fn can_be_executed_by(&self, route: &Route, profile: &Profile) -> WardenResult<bool> {
        let mut node = self;
        for module_name in route.modules() {
            node = node.nested_module(module_name)?;
        }

        let allowed = node
            .object(route.object_name())?
            .can_be_executed_by(route.method_name(), profile)?;

        debug!(
            object = %route.object_name(),
            method = %route.method_name(),
            profile = %profile.as_str(),
            allowed,
            "authorization query resolved"
        );

        Ok(allowed)
    }
}
