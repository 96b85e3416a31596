//! Identity registry: declared component type -> identity descriptor.
//!
//! Component types register their `{fqn, version}` descriptor once, at
//! definition time. The collector looks nodes up here by their declared type
//! name; types that never registered simply have no identity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::identity::ComponentIdentity;

/// Identity descriptor attached to a component type.
///
/// Descriptors come from user code and manifests, so they may be incomplete.
/// Use [`IdentityDescriptor::to_identity`] to get a usable identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDescriptor {
    #[serde(default)]
    pub fqn: String,
    #[serde(default)]
    pub version: String,
}

impl IdentityDescriptor {
    pub fn new(fqn: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            version: version.into(),
        }
    }

    /// The identity described, or `None` when either field is empty.
    pub fn to_identity(&self) -> Option<ComponentIdentity> {
        if self.fqn.is_empty() || self.version.is_empty() {
            return None;
        }
        Some(ComponentIdentity::new(self.fqn.clone(), self.version.clone()))
    }
}

/// Registry of identity descriptors keyed by declared type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityRegistry {
    descriptors: HashMap<String, IdentityDescriptor>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the descriptor for a declared type.
    pub fn register(&mut self, declared_type: impl Into<String>, descriptor: IdentityDescriptor) {
        self.descriptors.insert(declared_type.into(), descriptor);
    }

    /// Builder form of [`IdentityRegistry::register`].
    pub fn with(mut self, declared_type: impl Into<String>, descriptor: IdentityDescriptor) -> Self {
        self.register(declared_type, descriptor);
        self
    }

    pub fn descriptor(&self, declared_type: &str) -> Option<&IdentityDescriptor> {
        self.descriptors.get(declared_type)
    }

    /// Identity of a declared type, if it registered a complete descriptor.
    pub fn lookup(&self, declared_type: &str) -> Option<ComponentIdentity> {
        self.descriptor(declared_type)?.to_identity()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
