//! Analytics encoder: compact, deterministic encoding of identity lists.
//!
//! Identities are bucketed by version and, inside each bucket, grouped by
//! shared dotted prefixes:
//!
//! ```text
//! 0.1.2!aws-cdk-lib.{CoolResource,OtherResource},1.2.3!aws-cdk-lib.{CfnResource,Stack}
//! ```
//!
//! # Ordering
//!
//! Output never depends on input order. Duplicates are dropped, version
//! buckets are ordered by version string (byte order), and type names inside
//! a bucket are ordered segment by segment (byte order per segment).
//!
//! # Encoding choice
//!
//! The plaintext body is compared against base64(gzip(body)). The shorter one
//! wins; ties keep plaintext because it needs no decoding downstream.

mod grouping;
pub mod payload;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::identity::ComponentIdentity;
use crate::obs;

use grouping::GroupingTree;
pub use payload::{EncodedPayload, Encoding, FORMAT_VERSION};

/// Grouped plaintext body for `records`.
pub fn render_plaintext(records: &[ComponentIdentity]) -> String {
    let mut buckets: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(record.version.as_str())
            .or_default()
            .push(record.type_id.as_str());
    }

    buckets
        .into_iter()
        .map(|(version, mut names)| {
            names.sort_by(|a, b| a.split('.').cmp(b.split('.')));
            names.dedup();
            format!("{version}!{}", GroupingTree::build(names).render())
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Encode `records` into a tagged payload.
///
/// Fails only if the compression primitive fails, which is an internal
/// error rather than a usage error.
pub fn encode(records: &[ComponentIdentity], force_uncompressed: bool) -> Result<EncodedPayload> {
    let plaintext = render_plaintext(records);
    let plaintext_len = plaintext.len();

    let (encoding, body) = if force_uncompressed {
        (Encoding::Plaintext, plaintext)
    } else {
        let compressed = payload::gzip_base64(&plaintext)?;
        if plaintext.len() <= compressed.len() {
            (Encoding::Plaintext, plaintext)
        } else {
            (Encoding::DeflateBase64, compressed)
        }
    };

    let payload = EncodedPayload {
        format_version: FORMAT_VERSION,
        encoding,
        body,
    };
    obs::emit_payload_encoded(
        encoding.tag(),
        plaintext_len,
        payload.body.len(),
        &payload.fingerprint(),
    );
    Ok(payload)
}
