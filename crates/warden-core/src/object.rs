//! Object-level permission registry.

use std::collections::HashMap;

use tracing::debug;

use warden_contracts::{
    error::{WardenError, WardenResult},
    profile::Profile,
};

use crate::method::MethodPermission;

/// Permission registry for one callable object.
///
/// Owns the mapping from method name to [`MethodPermission`] and enforces
/// method-name uniqueness: inserting a duplicate name is an error, never a
/// silent overwrite.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    name: String,
    methods: HashMap<String, MethodPermission>,
}

impl ObjectRegistry {
    /// Create an empty registry for the object `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: HashMap::new(),
        }
    }

    /// The object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a method entry seeded with `profiles`.
    ///
    /// Returns `WardenError::DuplicateMethod` if a method with this name is
    /// already registered; the existing entry is left untouched.
    pub fn create_method<I>(
        &mut self,
        name: impl Into<String>,
        profiles: I,
    ) -> WardenResult<&mut MethodPermission>
    where
        I: IntoIterator<Item = Profile>,
    {
        let name = name.into();
        if self.methods.contains_key(&name) {
            return Err(WardenError::DuplicateMethod {
                name,
                object: self.name.clone(),
            });
        }

        debug!(object = %self.name, method = %name, "method registered");

        let mut entry = MethodPermission::new(name.clone());
        entry.allow(profiles);
        Ok(self.methods.entry(name).or_insert(entry))
    }

    /// Look up a method entry. Fails with `MethodNotFound` if absent.
    pub fn method(&self, name: &str) -> WardenResult<&MethodPermission> {
        self.methods.get(name).ok_or_else(|| WardenError::MethodNotFound {
            name: name.to_string(),
            object: self.name.clone(),
        })
    }

    /// Mutable variant of [`method`](Self::method).
    pub fn method_mut(&mut self, name: &str) -> WardenResult<&mut MethodPermission> {
        self.methods
            .get_mut(name)
            .ok_or_else(|| WardenError::MethodNotFound {
                name: name.to_string(),
                object: self.name.clone(),
            })
    }

    /// True if a method with this name is registered.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Remove a method entry. Fails with `MethodNotFound` if absent.
    pub fn remove_method(&mut self, name: &str) -> WardenResult<()> {
        self.methods
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| WardenError::MethodNotFound {
                name: name.to_string(),
                object: self.name.clone(),
            })
    }

    /// Allow `profiles` on the named method.
    ///
    /// Delegates to the entry; a missing method is `MethodNotFound`.
    pub fn allow<I>(&mut self, method: &str, profiles: I) -> WardenResult<()>
    where
        I: IntoIterator<Item = Profile>,
    {
        self.method_mut(method)?.allow(profiles);
        Ok(())
    }

    /// Withdraw `profiles` from the named method.
    pub fn disallow<I>(&mut self, method: &str, profiles: I) -> WardenResult<()>
    where
        I: IntoIterator<Item = Profile>,
    {
        self.method_mut(method)?.disallow(profiles);
        Ok(())
    }

    /// True iff the named method allows `profile`.
    ///
    /// A missing method propagates `MethodNotFound` — it is never folded
    /// into a false authorization result.
    pub fn can_be_executed_by(&self, method: &str, profile: &Profile) -> WardenResult<bool> {
        Ok(self.method(method)?.can_be_executed_by(profile))
    }

    /// Iterate over all registered method entries.
    pub fn methods(&self) -> impl Iterator<Item = &MethodPermission> {
        self.methods.values()
    }

    /// Number of registered methods.
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}
