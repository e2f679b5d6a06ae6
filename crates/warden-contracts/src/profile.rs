//! Caller profile types.
//!
//! Warden authorizes by profile: an identifier for a caller's authorization
//! class (e.g. "admin", "finance"), never an individual user. Mapping users
//! to profiles is the hosting application's concern.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// An opaque profile identifier.
///
/// Profile names should be short and stable — they appear in permission
/// metadata next to the code they protect and in authorization logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile(pub String);

impl Profile {
    /// Construct a profile from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The profile name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The set of profiles allowed to invoke one method.
///
/// Backed by a `HashSet`, so membership tests are O(1) and adds/removes are
/// idempotent by construction.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    inner: HashSet<Profile>,
}

impl ProfileSet {
    /// Add a profile to the set. Adding an already-present profile is a no-op.
    pub fn add(&mut self, profile: Profile) {
        self.inner.insert(profile);
    }

    /// Remove a profile from the set. Removing an absent profile is a no-op.
    pub fn remove(&mut self, profile: &Profile) {
        self.inner.remove(profile);
    }

    /// Return true if the set contains the given profile.
    pub fn contains(&self, profile: &Profile) -> bool {
        self.inner.contains(profile)
    }

    /// Return an iterator over all profiles in the set.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.inner.iter()
    }

    /// Number of profiles in the set.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if no profile has been added.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Profile> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = Profile>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
