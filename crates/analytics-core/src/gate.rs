//! Inclusion gate for the metadata resource.
//!
//! Decides, per deployment target, whether the synthesized template carries
//! the analytics payload. Regions known at synthesis time are checked
//! against [`SUPPORTED_REGIONS`]; deferred regions produce a deploy-time
//! [`DeployCondition`] so the template itself re-checks support.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Regions where the metadata resource type is available.
///
/// Append-only data, sorted.
pub const SUPPORTED_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-south-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-north-1",
    "eu-south-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "me-south-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

/// Pseudo parameter holding the deployment region.
pub const REGION_PSEUDO_PARAMETER: &str = "AWS::Region";

/// `Fn::Or` accepts at most this many operands.
const MAX_OR_OPERANDS: usize = 10;

/// Deployment region as seen at synthesis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RegionValue {
    /// Concrete region name.
    Resolved(String),
    /// Only known at deploy time; carries the placeholder reference.
    Deferred(String),
}

impl RegionValue {
    pub fn resolved(region: impl Into<String>) -> Self {
        RegionValue::Resolved(region.into())
    }

    /// The region pseudo parameter, resolved by the deployment engine.
    pub fn deferred() -> Self {
        RegionValue::Deferred(REGION_PSEUDO_PARAMETER.to_string())
    }
}

impl std::fmt::Display for RegionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionValue::Resolved(region) => f.write_str(region),
            RegionValue::Deferred(placeholder) => write!(f, "${{{placeholder}}}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Deploy-time boolean condition expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployCondition(pub Value);

impl DeployCondition {
    /// True when `placeholder` resolves to one of `regions`.
    ///
    /// Operands are chunked so no `Fn::Or` exceeds its operand limit.
    /// `regions` must not be empty; [`InclusionGate::decide`] omits instead.
    pub fn region_in(placeholder: &str, regions: &[&str]) -> Self {
        let equals: Vec<Value> = regions
            .iter()
            .map(|r| json!({ "Fn::Equals": [{ "Ref": placeholder }, r] }))
            .collect();
        DeployCondition(any_of(equals))
    }
}

fn any_of(mut operands: Vec<Value>) -> Value {
    if operands.len() == 1 {
        return operands.remove(0);
    }
    if operands.len() <= MAX_OR_OPERANDS {
        return json!({ "Fn::Or": operands });
    }
    let chunks: Vec<Value> = operands
        .chunks(MAX_OR_OPERANDS)
        .map(|chunk| any_of(chunk.to_vec()))
        .collect();
    any_of(chunks)
}

/// Whether, and how, the payload is attached for one deployment target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "condition", rename_all = "snake_case")]
pub enum InclusionDecision {
    Omit,
    IncludeUnconditional,
    IncludeConditional(DeployCondition),
}

impl InclusionDecision {
    pub fn label(&self) -> &'static str {
        match self {
            InclusionDecision::Omit => "omit",
            InclusionDecision::IncludeUnconditional => "include",
            InclusionDecision::IncludeConditional(_) => "include_conditional",
        }
    }

    pub fn includes(&self) -> bool {
        !matches!(self, InclusionDecision::Omit)
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Region-support gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionGate {
    supported: Vec<String>,
    enabled: bool,
}

impl Default for InclusionGate {
    fn default() -> Self {
        Self::with_regions(SUPPORTED_REGIONS.iter().copied())
    }
}

impl InclusionGate {
    /// Gate over an explicit region table.
    pub fn with_regions<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: regions.into_iter().map(Into::into).collect(),
            enabled: true,
        }
    }

    /// Disable reporting entirely; every decision becomes `Omit`.
    pub fn with_reporting(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn supports(&self, region: &str) -> bool {
        self.supported.iter().any(|r| r == region)
    }

    /// Decide inclusion for the given target region.
    pub fn decide(&self, region: &RegionValue) -> InclusionDecision {
        if !self.enabled {
            return InclusionDecision::Omit;
        }
        match region {
            RegionValue::Resolved(r) if self.supports(r) => InclusionDecision::IncludeUnconditional,
            RegionValue::Resolved(_) => InclusionDecision::Omit,
            // An empty `Fn::Or` is rejected by the deployment engine.
            RegionValue::Deferred(_) if self.supported.is_empty() => InclusionDecision::Omit,
            RegionValue::Deferred(placeholder) => {
                let regions: Vec<&str> = self.supported.iter().map(String::as_str).collect();
                InclusionDecision::IncludeConditional(DeployCondition::region_in(
                    placeholder,
                    &regions,
                ))
            }
        }
    }
}
