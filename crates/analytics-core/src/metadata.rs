//! Metadata resource synthesis.
//!
//! Ties the pipeline together for one stack: gate the target region,
//! collect trusted identities from the tree, encode them, and attach the
//! `CDKMetadata` resource (plus its deploy-time condition when the region
//! is deferred) to the template.

use serde_json::{json, Map};

use crate::collector::ProvenanceCollector;
use crate::config::AnalyticsConfig;
use crate::encoder::{self, EncodedPayload};
use crate::error::{AnalyticsError, Result};
use crate::gate::{InclusionDecision, InclusionGate, RegionValue};
use crate::obs;
use crate::provenance::ProvenanceFilter;
use crate::registry::IdentityRegistry;
use crate::template::Template;
use crate::tree::Component;

/// Logical id of the metadata resource.
pub const METADATA_LOGICAL_ID: &str = "CDKMetadata";

/// Resource type of the metadata resource.
pub const METADATA_RESOURCE_TYPE: &str = "AWS::CDK::Metadata";

/// Property carrying the encoded payload.
pub const ANALYTICS_PROPERTY: &str = "Analytics";

/// Logical id of the deploy-time availability condition.
pub const METADATA_CONDITION_ID: &str = "CDKMetadataAvailable";

/// Outcome of synthesizing the metadata resource for one stack.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataOutcome {
    pub decision: InclusionDecision,
    /// Present unless the decision was `Omit`.
    pub payload: Option<EncodedPayload>,
}

/// Synthesizes the metadata resource into stack templates.
#[derive(Debug, Clone)]
pub struct MetadataResource<'a> {
    registry: &'a IdentityRegistry,
    config: AnalyticsConfig,
    filter: ProvenanceFilter,
    gate: InclusionGate,
}

impl<'a> MetadataResource<'a> {
    pub fn new(registry: &'a IdentityRegistry, config: AnalyticsConfig) -> Self {
        let gate = InclusionGate::default().with_reporting(config.version_reporting);
        Self {
            registry,
            config,
            filter: ProvenanceFilter::default(),
            gate,
        }
    }

    /// Override the provenance filter.
    pub fn with_filter(mut self, filter: ProvenanceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Override the region gate. Reporting still follows the config.
    pub fn with_gate(mut self, gate: InclusionGate) -> Self {
        self.gate = gate.with_reporting(self.config.version_reporting);
        self
    }

    /// Encoded payload for the tree under `root`, without touching a template.
    pub fn analytics(&self, root: &dyn Component) -> Result<EncodedPayload> {
        let identities = ProvenanceCollector::new(self.registry, self.config.clone())
            .with_filter(self.filter.clone())
            .collect(root);
        encoder::encode(identities.as_slice(), self.config.force_uncompressed)
    }

    /// Attach the metadata resource for `root` to `template`, as the gate
    /// allows for `region`.
    pub fn synthesize(
        &self,
        root: &dyn Component,
        region: &RegionValue,
        template: &mut Template,
    ) -> Result<MetadataOutcome> {
        let decision = self.gate.decide(region);
        obs::emit_gate_decided(&region.to_string(), decision.label());

        if !decision.includes() {
            return Ok(MetadataOutcome {
                decision,
                payload: None,
            });
        }

        // Both logical ids must be free before either is written.
        if template.resource(METADATA_LOGICAL_ID).is_some() {
            return Err(AnalyticsError::DuplicateLogicalId(
                METADATA_LOGICAL_ID.to_string(),
            ));
        }
        let conditional = matches!(decision, InclusionDecision::IncludeConditional(_));
        if conditional && template.condition(METADATA_CONDITION_ID).is_some() {
            return Err(AnalyticsError::DuplicateLogicalId(
                METADATA_CONDITION_ID.to_string(),
            ));
        }

        let payload = self.analytics(root)?;
        let mut properties = Map::new();
        properties.insert(ANALYTICS_PROPERTY.to_string(), json!(payload.to_string()));
        let mut resource = json!({
            "Type": METADATA_RESOURCE_TYPE,
            "Properties": properties,
        });

        if let InclusionDecision::IncludeConditional(condition) = &decision {
            template.add_condition(METADATA_CONDITION_ID, condition.0.clone())?;
            resource["Condition"] = json!(METADATA_CONDITION_ID);
        }
        template.add_resource(METADATA_LOGICAL_ID, resource)?;

        Ok(MetadataOutcome {
            decision,
            payload: Some(payload),
        })
    }
}
