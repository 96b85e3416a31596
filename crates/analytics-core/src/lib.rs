//! Construct Analytics Core Library
//!
//! Collects the identities of trusted components in a construct tree,
//! encodes them into a compact analytics payload, and attaches that payload
//! to synthesized templates where the deployment region supports it.

pub mod collector;
pub mod config;
pub mod encoder;
pub mod error;
pub mod gate;
pub mod identity;
pub mod metadata;
pub mod obs;
pub mod provenance;
pub mod registry;
pub mod telemetry;
pub mod template;
pub mod tree;

pub use collector::{
    agent_version, host_runtime_agent, runtime_identity, ProvenanceCollector, RUNTIME_TYPE_ID,
};
pub use config::AnalyticsConfig;
pub use encoder::{encode, render_plaintext, EncodedPayload, Encoding, FORMAT_VERSION};
pub use error::{AnalyticsError, Result};
pub use gate::{
    DeployCondition, InclusionDecision, InclusionGate, RegionValue, REGION_PSEUDO_PARAMETER,
    SUPPORTED_REGIONS,
};
pub use identity::{ComponentIdentity, IdentitySet};
pub use metadata::{
    MetadataOutcome, MetadataResource, ANALYTICS_PROPERTY, METADATA_CONDITION_ID,
    METADATA_LOGICAL_ID, METADATA_RESOURCE_TYPE,
};
pub use obs::{emit_collection_finished, emit_gate_decided, emit_payload_encoded, SynthSpan};
pub use provenance::{ProvenanceFilter, TRUSTED_PREFIXES};
pub use registry::{IdentityDescriptor, IdentityRegistry};
pub use telemetry::init_tracing;
pub use template::Template;
pub use tree::{find_all, Component, ConstructNode};

/// Construct Analytics version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
