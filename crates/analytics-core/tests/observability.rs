//! Observability tests for analytics synthesis.
//!
//! These tests verify that structured tracing events are emitted for the
//! gate decision, the tree walk and the encoded payload.

use analytics_core::{
    emit_collection_finished, emit_gate_decided, emit_payload_encoded, encode, AnalyticsConfig,
    ComponentIdentity, ConstructNode, IdentityDescriptor, IdentityRegistry, MetadataResource,
    RegionValue, SynthSpan, Template,
};
use tracing_test::traced_test;

/// Test: emit_gate_decided logs region and decision
#[traced_test]
#[test]
fn test_emit_gate_decided_logs_region_and_decision() {
    emit_gate_decided("us-east-1", "include");
    assert!(logs_contain("gate.decided"));
    assert!(logs_contain("us-east-1"));
}

/// Test: emit_payload_encoded logs encoding and fingerprint
#[traced_test]
#[test]
fn test_emit_payload_encoded_logs_encoding() {
    emit_payload_encoded("plaintext", 42, 42, "abc123");
    assert!(logs_contain("payload.encoded"));
    assert!(logs_contain("abc123"));
}

/// Test: emit_collection_finished does not panic
#[traced_test]
#[test]
fn test_emit_collection_finished() {
    emit_collection_finished(12, 3);
}

/// Test: SynthSpan::enter creates an entered span without panicking
#[traced_test]
#[test]
fn test_synth_span_enter_creates_span() {
    let span = SynthSpan::enter("MyStack");
    drop(span);
}

/// Test: encoding emits the payload fingerprint
#[traced_test]
#[test]
fn test_encode_emits_payload_fingerprint() {
    let payload = encode(&[ComponentIdentity::new("aws-cdk-lib.Stack", "2.0.0")], true)
        .expect("encode");
    assert!(logs_contain(&payload.fingerprint()));
}

/// Test: synthesis logs the gate decision for deferred regions
#[traced_test]
#[test]
fn test_synthesize_logs_conditional_decision() {
    let registry = IdentityRegistry::new()
        .with("Stack", IdentityDescriptor::new("aws-cdk-lib.Stack", "2.0.0"));
    let tree = ConstructNode::new("Stack", "Stack");
    let mut template = Template::new();

    let _span = SynthSpan::enter("Stack");
    MetadataResource::new(&registry, AnalyticsConfig::isolated())
        .synthesize(&tree, &RegionValue::deferred(), &mut template)
        .expect("synthesize");

    assert!(logs_contain("include_conditional"));
}
