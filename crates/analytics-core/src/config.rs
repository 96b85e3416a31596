//! Analytics configuration.
//!
//! The allow-lists are compiled in; only the knobs below vary per run.

use serde::{Deserialize, Serialize};

/// Environment variable carrying the language-binding agent string.
pub const AGENT_ENV_VAR: &str = "JSII_AGENT";

/// Analytics configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Agent string reported as the runtime version (e.g. `Java/1.2.3.4`).
    /// `None` falls back to the host runtime version.
    pub agent: Option<String>,
    /// Whether templates carry the metadata resource at all.
    pub version_reporting: bool,
    /// Always emit the plaintext encoding.
    pub force_uncompressed: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            agent: std::env::var(AGENT_ENV_VAR).ok().filter(|a| !a.is_empty()),
            version_reporting: true,
            force_uncompressed: false,
        }
    }
}

impl AnalyticsConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Config that ignores the environment entirely.
    pub fn isolated() -> Self {
        AnalyticsConfig {
            agent: None,
            version_reporting: true,
            force_uncompressed: false,
        }
    }

    /// Set the agent string
    pub fn with_agent(mut self, agent: &str) -> Self {
        self.agent = Some(agent.to_string()).filter(|a| !a.is_empty());
        self
    }

    pub fn with_version_reporting(mut self, enabled: bool) -> Self {
        self.version_reporting = enabled;
        self
    }

    pub fn with_force_uncompressed(mut self, force: bool) -> Self {
        self.force_uncompressed = force;
        self
    }
}
