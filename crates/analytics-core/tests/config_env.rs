//! Environment-driven configuration.
//!
//! Kept in its own test binary with a single test: it mutates the process
//! environment.

use analytics_core::config::AGENT_ENV_VAR;
use analytics_core::{runtime_identity, AnalyticsConfig, RUNTIME_TYPE_ID};

#[test]
fn agent_is_read_from_environment() {
    std::env::set_var(AGENT_ENV_VAR, "DotNet/5.0.3/1.20.1");
    let config = AnalyticsConfig::from_env();
    assert_eq!(config.agent.as_deref(), Some("DotNet/5.0.3/1.20.1"));
    let runtime = runtime_identity(&config);
    assert_eq!(runtime.type_id, RUNTIME_TYPE_ID);
    assert_eq!(runtime.version, "DotNet/5.0.3/1.20.1");

    std::env::set_var(AGENT_ENV_VAR, "");
    assert!(AnalyticsConfig::from_env().agent.is_none());

    std::env::remove_var(AGENT_ENV_VAR);
    let config = AnalyticsConfig::from_env();
    assert!(config.agent.is_none());
    assert!(runtime_identity(&config).version.starts_with("rust/"));
}
