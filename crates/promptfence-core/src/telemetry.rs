//! Telemetry events derived from decisions
//!
//! Events carry the action and the triggering type ids only. Matched text
//! never leaves [`crate::fence::Inspection`].

use crate::policy::{ActionLevel, Decision, PolicyConfig};
use crate::types::DataType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reportable intervention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    /// When the decision was made
    pub timestamp: DateTime<Utc>,
    /// Host the input was destined for
    pub ai_domain: String,
    /// Preset id that produced the decision
    pub rule_id: String,
    /// Triggering types, ascending
    pub data_types: Vec<DataType>,
    /// WARN or BLOCK
    pub action: ActionLevel,
    /// Reporting client version
    pub extension_version: String,
}

impl TelemetryEvent {
    /// Build an event for a WARN or BLOCK decision; `None` for ALLOW
    pub fn from_decision(
        decision: &Decision,
        config: &PolicyConfig,
        ai_domain: impl Into<String>,
        extension_version: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Option<Self> {
        if decision.is_allow() {
            return None;
        }
        Some(Self {
            timestamp,
            ai_domain: ai_domain.into(),
            rule_id: config.preset.id.to_string(),
            data_types: decision.triggering_types.iter().copied().collect(),
            action: decision.action,
            extension_version: extension_version.into(),
        })
    }

    /// Same as [`from_decision`](Self::from_decision), stamped now
    pub fn now(
        decision: &Decision,
        config: &PolicyConfig,
        ai_domain: impl Into<String>,
        extension_version: impl Into<String>,
    ) -> Option<Self> {
        Self::from_decision(decision, config, ai_domain, extension_version, Utc::now())
    }
}
