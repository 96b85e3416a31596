//! Component identity values and the deduplicating identity set.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fully-qualified type name and version of one component type.
///
/// Versions are opaque: they are compared for equality and ordered as plain
/// strings, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentIdentity {
    /// Dotted hierarchical type name, e.g. `aws-cdk-lib.aws_s3.Bucket`.
    #[serde(rename = "fqn")]
    pub type_id: String,
    pub version: String,
}

impl ComponentIdentity {
    pub fn new(type_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}!{}", self.version, self.type_id)
    }
}

/// Ordered set of identities keyed by `(type_id, version)`.
///
/// Inserting a key that is already present is a no-op, so the first
/// occurrence keeps its position. Serializes as a plain list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySet {
    entries: Vec<ComponentIdentity>,
    seen: HashSet<ComponentIdentity>,
}

impl IdentitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity. Returns `false` when the key was already present.
    pub fn insert(&mut self, identity: ComponentIdentity) -> bool {
        if !self.seen.insert(identity.clone()) {
            return false;
        }
        self.entries.push(identity);
        true
    }

    pub fn contains(&self, identity: &ComponentIdentity) -> bool {
        self.seen.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentIdentity> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ComponentIdentity] {
        &self.entries
    }
}

impl Serialize for IdentitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IdentitySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<ComponentIdentity>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

impl FromIterator<ComponentIdentity> for IdentitySet {
    fn from_iter<I: IntoIterator<Item = ComponentIdentity>>(iter: I) -> Self {
        let mut set = IdentitySet::new();
        set.extend(iter);
        set
    }
}

impl Extend<ComponentIdentity> for IdentitySet {
    fn extend<I: IntoIterator<Item = ComponentIdentity>>(&mut self, iter: I) {
        for identity in iter {
            self.insert(identity);
        }
    }
}

impl<'a> IntoIterator for &'a IdentitySet {
    type Item = &'a ComponentIdentity;
    type IntoIter = std::slice::Iter<'a, ComponentIdentity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
