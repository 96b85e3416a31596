//! Provenance collector: inventory of trusted component identities in a tree.
//!
//! Best effort. Nodes without a registered identity, and identities outside
//! the trusted prefixes, are skipped without error. The result always ends
//! with exactly one runtime entry describing the binding agent.

use crate::config::AnalyticsConfig;
use crate::identity::{ComponentIdentity, IdentitySet};
use crate::obs;
use crate::provenance::ProvenanceFilter;
use crate::registry::IdentityRegistry;
use crate::tree::{find_all, Component};

/// Type name of the synthetic runtime entry.
pub const RUNTIME_TYPE_ID: &str = "jsii-runtime.Runtime";

/// Host runtime name used in the fallback agent string.
pub const HOST_RUNTIME_NAME: &str = "rust";

/// Compiler version recorded at build time.
const HOST_RUNTIME_VERSION: &str = env!("ANALYTICS_RUSTC_VERSION");

/// Fallback agent string: `<hostRuntimeName>/<hostRuntimeVersion>`.
pub fn host_runtime_agent() -> String {
    format!("{HOST_RUNTIME_NAME}/{HOST_RUNTIME_VERSION}")
}

/// Agent string reported for the runtime entry.
pub fn agent_version(config: &AnalyticsConfig) -> String {
    match config.agent.as_deref() {
        Some(agent) if !agent.is_empty() => agent.to_string(),
        _ => host_runtime_agent(),
    }
}

/// The synthetic identity describing the binding agent.
pub fn runtime_identity(config: &AnalyticsConfig) -> ComponentIdentity {
    ComponentIdentity::new(RUNTIME_TYPE_ID, agent_version(config))
}

/// Walks component trees and gathers trusted identities.
#[derive(Debug, Clone)]
pub struct ProvenanceCollector<'a> {
    registry: &'a IdentityRegistry,
    filter: ProvenanceFilter,
    config: AnalyticsConfig,
}

impl<'a> ProvenanceCollector<'a> {
    /// Collector with the default trusted-prefix table.
    pub fn new(registry: &'a IdentityRegistry, config: AnalyticsConfig) -> Self {
        Self {
            registry,
            filter: ProvenanceFilter::default(),
            config,
        }
    }

    /// Override the provenance filter.
    pub fn with_filter(mut self, filter: ProvenanceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Trusted identities under `root`, deduplicated, plus the runtime entry.
    pub fn collect(&self, root: &dyn Component) -> IdentitySet {
        let nodes = find_all(root);
        let mut identities = IdentitySet::new();

        for node in &nodes {
            let declared_type = node.declared_type();
            let Some(identity) = self.registry.lookup(declared_type) else {
                obs::emit_identity_missing(declared_type);
                continue;
            };
            // The runtime entry is reserved for the binding agent.
            if identity.type_id == RUNTIME_TYPE_ID || !self.filter.is_trusted(&identity.type_id) {
                obs::emit_identity_untrusted(&identity.type_id);
                continue;
            }
            identities.insert(identity);
        }

        identities.insert(runtime_identity(&self.config));

        obs::emit_collection_finished(nodes.len(), identities.len());
        identities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::IdentityDescriptor;
    use crate::tree::ConstructNode;

    fn registry() -> IdentityRegistry {
        IdentityRegistry::new()
            .with("Stack", IdentityDescriptor::new("aws-cdk-lib.Stack", "2.0.0"))
            .with("Bucket", IdentityDescriptor::new("aws-cdk-lib.aws_s3.Bucket", "2.0.0"))
            .with("Custom", IdentityDescriptor::new("mycoolthing.Custom", "1.0.0"))
    }

    #[test]
    fn test_host_runtime_agent_format() {
        let agent = host_runtime_agent();
        assert!(agent.starts_with("rust/"));
        assert!(agent.len() > "rust/".len());
    }

    #[test]
    fn test_agent_override_wins() {
        let config = AnalyticsConfig::isolated().with_agent("Java/1.2.3.4");
        assert_eq!(agent_version(&config), "Java/1.2.3.4");
        assert_eq!(
            runtime_identity(&config),
            ComponentIdentity::new(RUNTIME_TYPE_ID, "Java/1.2.3.4")
        );
    }

    #[test]
    fn test_collect_filters_and_dedups() {
        let registry = registry();
        let tree = ConstructNode::new("Stack", "Stack")
            .with_child(ConstructNode::new("A", "Bucket"))
            .with_child(ConstructNode::new("B", "Bucket"))
            .with_child(ConstructNode::new("C", "Custom"))
            .with_child(ConstructNode::new("D", "Unregistered"));

        let config = AnalyticsConfig::isolated().with_agent("Java/1.2.3.4");
        let set = ProvenanceCollector::new(&registry, config).collect(&tree);

        let rendered: Vec<String> = set.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "2.0.0!aws-cdk-lib.Stack",
                "2.0.0!aws-cdk-lib.aws_s3.Bucket",
                "Java/1.2.3.4!jsii-runtime.Runtime",
            ]
        );
    }

    #[test]
    fn test_runtime_entry_is_not_duplicated_when_registered() {
        let registry = IdentityRegistry::new()
            .with("Runtime", IdentityDescriptor::new(RUNTIME_TYPE_ID, "node/1"))
            .with("Same", IdentityDescriptor::new(RUNTIME_TYPE_ID, "Java/1"));
        let tree =
            ConstructNode::new("Root", "Runtime").with_child(ConstructNode::new("S", "Same"));
        let filter = ProvenanceFilter::with_prefixes(["jsii-runtime."]);
        let config = AnalyticsConfig::isolated().with_agent("Java/1");

        let set = ProvenanceCollector::new(&registry, config)
            .with_filter(filter)
            .collect(&tree);

        let runtime: Vec<&ComponentIdentity> =
            set.iter().filter(|i| i.type_id == RUNTIME_TYPE_ID).collect();
        assert_eq!(runtime, vec![&ComponentIdentity::new(RUNTIME_TYPE_ID, "Java/1")]);
        assert_eq!(set.len(), 1);
    }
}
