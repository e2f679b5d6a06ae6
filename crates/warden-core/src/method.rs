//! The leaf permission record: one method and its allowed profiles.

use warden_contracts::profile::{Profile, ProfileSet};

/// Permission entry for a single method.
///
/// The name is fixed at creation; the allowed set may be mutated at any time
/// through [`allow`](Self::allow) and [`disallow`](Self::disallow).
/// Membership tests are O(1).
#[derive(Debug, Clone)]
pub struct MethodPermission {
    name: String,
    allowed: ProfileSet,
}

impl MethodPermission {
    /// Entries are only created through `ObjectRegistry::create_method`,
    /// which enforces name uniqueness within the object.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allowed: ProfileSet::default(),
        }
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Allow every given profile to execute this method.
    ///
    /// Adding a profile that is already allowed is a no-op.
    pub fn allow<I>(&mut self, profiles: I)
    where
        I: IntoIterator<Item = Profile>,
    {
        for profile in profiles {
            self.allowed.add(profile);
        }
    }

    /// Withdraw every given profile from this method's allowed set.
    ///
    /// Removing a profile that was never allowed is a no-op.
    pub fn disallow<I>(&mut self, profiles: I)
    where
        I: IntoIterator<Item = Profile>,
    {
        for profile in profiles {
            self.allowed.remove(&profile);
        }
    }

    /// True iff `profile` is currently in the allowed set.
    ///
    /// No error conditions: an unknown profile simply returns false.
    pub fn can_be_executed_by(&self, profile: &Profile) -> bool {
        self.allowed.contains(profile)
    }

    /// The current allowed set.
    pub fn allowed(&self) -> &ProfileSet {
        &self.allowed
    }
}
