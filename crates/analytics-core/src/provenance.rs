//! Provenance filter: decides which component types are trusted enough to
//! be reported.
//!
//! Only types published under the vendor's own scopes, or by known
//! downstream distributions, are reported. Everything else is dropped before
//! it reaches the encoder.

/// Type-name prefixes whose components are reported.
///
/// Append-only data. Scopes end in `/`, package names end in `.`.
pub const TRUSTED_PREFIXES: &[&str] = &[
    // scopes
    "@aws-cdk/",
    "@aws-cdk-containers/",
    "@aws-solutions-konstruk/",
    "@aws-solutions-constructs/",
    "@amzn/",
    // packages
    "aws-rfdk.",
    "aws-cdk-lib.",
    "monocdk.",
];

/// Prefix-based trust decision over fully-qualified type names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceFilter {
    prefixes: Vec<String>,
}

impl Default for ProvenanceFilter {
    fn default() -> Self {
        Self::with_prefixes(TRUSTED_PREFIXES.iter().copied())
    }
}

impl ProvenanceFilter {
    /// Filter over an explicit prefix table.
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `type_id` starts with one of the trusted prefixes.
    pub fn is_trusted(&self, type_id: &str) -> bool {
        self.prefixes.iter().any(|p| type_id.starts_with(p.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}
