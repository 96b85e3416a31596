//! Minimal deployment-template model.
//!
//! Only what the metadata resource needs: ordered `Resources` and
//! `Conditions` sections that serialize to the usual template JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AnalyticsError, Result};

/// Synthesized template sections touched by analytics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub conditions: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub resources: Map<String, Value>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource under a new logical id.
    pub fn add_resource(&mut self, logical_id: &str, resource: Value) -> Result<()> {
        if self.resources.contains_key(logical_id) {
            return Err(AnalyticsError::DuplicateLogicalId(logical_id.to_string()));
        }
        self.resources.insert(logical_id.to_string(), resource);
        Ok(())
    }

    /// Add a condition under a new logical id.
    pub fn add_condition(&mut self, logical_id: &str, expression: Value) -> Result<()> {
        if self.conditions.contains_key(logical_id) {
            return Err(AnalyticsError::DuplicateLogicalId(logical_id.to_string()));
        }
        self.conditions.insert(logical_id.to_string(), expression);
        Ok(())
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Value> {
        self.resources.get(logical_id)
    }

    pub fn condition(&self, logical_id: &str) -> Option<&Value> {
        self.conditions.get(logical_id)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
