//! Policy evaluation
//!
//! Precedence, evaluated in order:
//! 1. any BLOCK type and BLOCK enabled -> BLOCK with the BLOCK types
//! 2. any WARN type and WARN enabled -> WARN with the WARN types
//! 3. otherwise ALLOW with no types
//!
//! A disabled BLOCK switch drops blocked types for the call; they are not
//! downgraded to WARN.

use crate::error::FenceError;
use crate::preset::Preset;
use crate::types::DataType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Enforcement action, ordered `Allow < Warn < Block`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum ActionLevel {
    /// Let the input through
    #[default]
    Allow = 0,
    /// Ask the user to confirm or anonymize
    Warn = 1,
    /// Refuse the input unless anonymized
    Block = 2,
}

impl ActionLevel {
    /// Stable wire identifier
    pub const fn id(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Warn => "WARN",
            Self::Block => "BLOCK",
        }
    }
}

impl fmt::Display for ActionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ActionLevel {
    type Err = FenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALLOW" => Ok(Self::Allow),
            "WARN" => Ok(Self::Warn),
            "BLOCK" => Ok(Self::Block),
            _ => Err(FenceError::UnknownAction(s.to_string())),
        }
    }
}

/// One action per data type; unset types are `Allow`.
///
/// Serialized as a map keyed by data type id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<DataType, ActionLevel>",
    into = "BTreeMap<DataType, ActionLevel>"
)]
pub struct RuleMap {
    actions: [ActionLevel; DataType::COUNT],
}

impl RuleMap {
    /// Rule map allowing everything
    pub const fn allow_all() -> Self {
        Self {
            actions: [ActionLevel::Allow; DataType::COUNT],
        }
    }

    /// Build from one action per type, in detector order
    pub const fn new(
        email: ActionLevel,
        phone: ActionLevel,
        iban: ActionLevel,
        credit_card: ActionLevel,
        address: ActionLevel,
        password: ActionLevel,
    ) -> Self {
        Self {
            actions: [email, phone, iban, credit_card, address, password],
        }
    }

    /// Action configured for `data_type`
    #[inline]
    pub fn get(&self, data_type: DataType) -> ActionLevel {
        self.actions[data_type.index()]
    }

    /// Copy with `data_type` set to `action`
    #[must_use]
    pub fn with(mut self, data_type: DataType, action: ActionLevel) -> Self {
        self.actions[data_type.index()] = action;
        self
    }

    /// `(type, action)` pairs in detector order
    pub fn iter(&self) -> impl Iterator<Item = (DataType, ActionLevel)> + '_ {
        DataType::ALL.into_iter().map(|t| (t, self.get(t)))
    }

    /// Types configured with exactly `action`
    pub fn types_with(&self, action: ActionLevel) -> BTreeSet<DataType> {
        self.iter()
            .filter(|(_, a)| *a == action)
            .map(|(t, _)| t)
            .collect()
    }
}

impl FromIterator<(DataType, ActionLevel)> for RuleMap {
    fn from_iter<I: IntoIterator<Item = (DataType, ActionLevel)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::allow_all(), |rules, (t, a)| rules.with(t, a))
    }
}

impl From<BTreeMap<DataType, ActionLevel>> for RuleMap {
    fn from(map: BTreeMap<DataType, ActionLevel>) -> Self {
        map.into_iter().collect()
    }
}

impl From<RuleMap> for BTreeMap<DataType, ActionLevel> {
    fn from(rules: RuleMap) -> Self {
        rules.iter().collect()
    }
}

/// Active policy: preset, effective rules and global switches.
///
/// Immutable snapshot; changing settings means building a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Selected preset
    pub preset: &'static Preset,
    /// Effective per-type rules (the preset's unless overridden)
    pub rules: RuleMap,
    /// Global WARN switch
    pub enable_warn: bool,
    /// Global BLOCK switch
    pub enable_block: bool,
}

impl PolicyConfig {
    /// Config using `preset` with both switches on
    pub fn new(preset: &'static Preset) -> Self {
        Self {
            preset,
            rules: preset.rules,
            enable_warn: true,
            enable_block: true,
        }
    }

    /// Config for a preset id, failing on unknown ids
    pub fn for_preset_id(id: &str) -> Result<Self, FenceError> {
        Preset::by_id(id)
            .map(Self::new)
            .ok_or_else(|| FenceError::UnknownPreset(id.to_string()))
    }

    /// Copy with the WARN switch set
    #[must_use]
    pub fn with_warn(self, enable_warn: bool) -> Self {
        Self { enable_warn, ..self }
    }

    /// Copy with the BLOCK switch set
    #[must_use]
    pub fn with_block(self, enable_block: bool) -> Self {
        Self {
            enable_block,
            ..self
        }
    }

    /// Copy with per-type rule overrides replacing the preset's rules
    #[must_use]
    pub fn with_rules(self, rules: RuleMap) -> Self {
        Self { rules, ..self }
    }

    /// Whether the effective rules differ from the preset's
    pub fn has_overrides(&self) -> bool {
        self.rules != self.preset.rules
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::new(Preset::default_preset())
    }
}

/// Outcome of evaluating one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Overall action
    pub action: ActionLevel,
    /// Types responsible for `action` (empty for ALLOW)
    pub triggering_types: BTreeSet<DataType>,
}

impl Decision {
    /// ALLOW with no triggering types
    pub fn allow() -> Self {
        Self::default()
    }

    /// Whether the input may pass without intervention
    pub fn is_allow(&self) -> bool {
        self.action == ActionLevel::Allow
    }
}

/// Evaluate a resolved type set against a policy
pub fn evaluate<I>(resolved_types: I, config: &PolicyConfig) -> Decision
where
    I: IntoIterator<Item = DataType>,
{
    let mut block_types = BTreeSet::new();
    let mut warn_types = BTreeSet::new();

    for data_type in resolved_types {
        match config.rules.get(data_type) {
            ActionLevel::Block => {
                block_types.insert(data_type);
            }
            ActionLevel::Warn => {
                warn_types.insert(data_type);
            }
            ActionLevel::Allow => {}
        }
    }

    let decision = if !block_types.is_empty() && config.enable_block {
        Decision {
            action: ActionLevel::Block,
            triggering_types: block_types,
        }
    } else if !warn_types.is_empty() && config.enable_warn {
        Decision {
            action: ActionLevel::Warn,
            triggering_types: warn_types,
        }
    } else {
        Decision::allow()
    };

    debug!(
        preset = config.preset.id,
        action = %decision.action,
        types = ?decision.triggering_types,
        "policy evaluated"
    );
    decision
}
