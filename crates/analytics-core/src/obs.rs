//! Structured observability hooks for analytics synthesis.
//!
//! This module provides:
//! - Stack-scoped tracing spans via `SynthSpan` RAII guard
//! - Emission functions for collection, encoding and gate decisions
//!
//! Events are emitted at `debug!`/`info!` level and filtered through
//! `RUST_LOG`. Extraction misses are `trace!` only.

use tracing::{debug, info, trace};

/// RAII guard that enters a stack-scoped span for one synthesis pass.
///
/// # Example
///
/// ```ignore
/// let _span = SynthSpan::enter("MyStack");
/// // every event below carries stack = "MyStack"
/// ```
pub struct SynthSpan {
    _span: tracing::span::EnteredSpan,
}

impl SynthSpan {
    /// Create and enter a span tagged with the stack name.
    pub fn enter(stack: &str) -> Self {
        let span = tracing::info_span!("analytics.synth", stack = %stack);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a node's declared type has no usable identity descriptor.
pub fn emit_identity_missing(declared_type: &str) {
    trace!(event = "collect.identity_missing", declared_type = %declared_type);
}

/// Emit event: an identity was dropped by the provenance filter.
pub fn emit_identity_untrusted(type_id: &str) {
    trace!(event = "collect.identity_untrusted", fqn = %type_id);
}

/// Emit event: tree walk finished.
pub fn emit_collection_finished(nodes_visited: usize, identities: usize) {
    debug!(
        event = "collect.finished",
        nodes_visited = nodes_visited,
        identities = identities,
    );
}

/// Emit event: payload encoded, with sizes and a fingerprint of the
/// serialized payload for comparing repeated synthesis passes.
pub fn emit_payload_encoded(encoding: &str, plaintext_len: usize, body_len: usize, fingerprint: &str) {
    info!(
        event = "payload.encoded",
        encoding = %encoding,
        plaintext_len = plaintext_len,
        body_len = body_len,
        fingerprint = %fingerprint,
    );
}

/// Emit event: inclusion decision for a deployment target.
pub fn emit_gate_decided(region: &str, decision: &str) {
    info!(event = "gate.decided", region = %region, decision = %decision);
}
