//! Stored settings and their resolution into a [`PolicyConfig`]

use crate::error::{FenceError, FenceResult};
use crate::policy::{ActionLevel, PolicyConfig, RuleMap};
use crate::preset::Preset;
use crate::types::DataType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Persisted settings record.
///
/// Mirrors what a configuration store keeps: preset id, optional per-type
/// rule overrides and the two global switches. Missing switches default to
/// enabled. Rule keys and values are kept as raw strings so that one bad
/// entry does not reject the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredConfig {
    /// Preset id; `personal` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// WARN switch; enabled when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_warn: Option<bool>,
    /// BLOCK switch; enabled when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_block: Option<bool>,
    /// Host-side diagnostics flag, not used by evaluation
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub debug_mode: bool,
    /// Full rule map (type id to action name) replacing the preset's rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<BTreeMap<String, String>>,
}

impl StoredConfig {
    /// Parse from JSON
    pub fn from_json_str(s: &str) -> FenceResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse from TOML
    pub fn from_toml_str(s: &str) -> FenceResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a `.json` or `.toml` file (TOML for any other extension)
    pub fn load(path: impl AsRef<Path>) -> FenceResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> FenceResult<String> {
        toml::to_string_pretty(self).map_err(|e| FenceError::InvalidConfig(e.to_string()))
    }

    /// Resolve into a policy, falling back to `personal` for unknown presets.
    ///
    /// Rules naming an unknown data type are ignored and rules with an
    /// unknown action count as ALLOW.
    pub fn resolve(&self) -> PolicyConfig {
        let preset = match self.preset.as_deref() {
            None => Preset::default_preset(),
            Some(id) => Preset::by_id(id).unwrap_or_else(|| {
                warn!(preset = id, "unknown preset, using {}", Preset::DEFAULT_ID);
                Preset::default_preset()
            }),
        };
        let lenient = self.build(preset, |err| -> Result<(), Infallible> {
            warn!(error = %err, "ignoring stored rule");
            Ok(())
        });
        match lenient {
            Ok(config) => config,
            Err(never) => match never {},
        }
    }

    /// Resolve into a policy, failing on unknown presets, data types or actions
    pub fn resolve_strict(&self) -> FenceResult<PolicyConfig> {
        let preset = match self.preset.as_deref() {
            None => Preset::default_preset(),
            Some(id) => Preset::by_id(id).ok_or_else(|| FenceError::UnknownPreset(id.to_string()))?,
        };
        self.build(preset, Err)
    }

    /// Apply switches and rules on top of `preset`; `on_invalid` decides
    /// whether a bad rule entry aborts or is skipped.
    fn build<E>(
        &self,
        preset: &'static Preset,
        mut on_invalid: impl FnMut(FenceError) -> Result<(), E>,
    ) -> Result<PolicyConfig, E> {
        let mut config = PolicyConfig::new(preset)
            .with_warn(self.enable_warn.unwrap_or(true))
            .with_block(self.enable_block.unwrap_or(true));

        if let Some(rules) = &self.rules {
            let mut overrides = RuleMap::allow_all();
            for (id, action) in rules {
                let parsed = id
                    .parse::<DataType>()
                    .and_then(|t| Ok((t, action.parse::<ActionLevel>()?)));
                match parsed {
                    Ok((data_type, action)) => overrides = overrides.with(data_type, action),
                    Err(err) => on_invalid(err)?,
                }
            }
            config = config.with_rules(overrides);
        }
        Ok(config)
    }
}

impl From<&PolicyConfig> for StoredConfig {
    fn from(config: &PolicyConfig) -> Self {
        let rules = config.has_overrides().then(|| {
            config
                .rules
                .iter()
                .map(|(t, a)| (t.id().to_string(), a.id().to_string()))
                .collect()
        });
        Self {
            preset: Some(config.preset.id.to_string()),
            rules,
            enable_warn: Some(config.enable_warn),
            enable_block: Some(config.enable_block),
            debug_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_defaults() {
        let config = StoredConfig::from_json_str("{}").unwrap().resolve();
        assert_eq!(config.preset.id, "personal");
        assert!(config.enable_warn);
        assert!(config.enable_block);
        assert!(!config.has_overrides());
    }

    #[test]
    fn test_json_record() {
        let stored = StoredConfig::from_json_str(
            r#"{"preset":"finance","enableWarn":true,"enableBlock":false,"debugMode":true}"#,
        )
        .unwrap();
        assert!(stored.debug_mode);
        let config = stored.resolve();
        assert_eq!(config.preset.id, "finance");
        assert!(!config.enable_block);
        assert_eq!(config.rules.get(DataType::Iban), ActionLevel::Block);
    }

    #[test]
    fn test_toml_record_with_rules() {
        let stored = StoredConfig::from_toml_str(
            r#"
preset = "developer"
enableWarn = false

[rules]
EMAIL = "BLOCK"
PASSWORD = "WARN"
"#,
        )
        .unwrap();
        let config = stored.resolve();
        assert_eq!(config.preset.id, "developer");
        assert!(!config.enable_warn);
        assert_eq!(config.rules.get(DataType::Email), ActionLevel::Block);
        assert_eq!(config.rules.get(DataType::Password), ActionLevel::Warn);
        // Stored rules replace the preset's wholesale
        assert_eq!(config.rules.get(DataType::CreditCard), ActionLevel::Allow);
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let stored = StoredConfig {
            preset: Some("legal".into()),
            ..Default::default()
        };
        assert_eq!(stored.resolve().preset.id, "personal");
        assert!(matches!(
            stored.resolve_strict(),
            Err(FenceError::UnknownPreset(id)) if id == "legal"
        ));
    }

    #[test]
    fn test_unknown_rule_type() {
        let stored =
            StoredConfig::from_json_str(r#"{"rules":{"SSN":"BLOCK","IBAN":"WARN"}}"#).unwrap();
        let config = stored.resolve();
        assert_eq!(config.rules.get(DataType::Iban), ActionLevel::Warn);
        assert!(matches!(
            stored.resolve_strict(),
            Err(FenceError::UnknownDataType(id)) if id == "SSN"
        ));
    }

    #[test]
    fn test_unknown_action_value() {
        let stored = StoredConfig::from_json_str(
            r#"{"preset":"finance","rules":{"IBAN":"BLOCK","EMAIL":"NOTIFY"}}"#,
        )
        .unwrap();

        // Lenient: the bad entry counts as ALLOW, the rest survives
        let config = stored.resolve();
        assert_eq!(config.preset.id, "finance");
        assert_eq!(config.rules.get(DataType::Iban), ActionLevel::Block);
        assert_eq!(config.rules.get(DataType::Email), ActionLevel::Allow);

        assert!(matches!(
            stored.resolve_strict(),
            Err(FenceError::UnknownAction(action)) if action == "NOTIFY"
        ));
    }

    #[test]
    fn test_lenient_resolve_keeps_switches_with_bad_rules() {
        let stored = StoredConfig::from_toml_str(
            r#"
enableWarn = false
enableBlock = false

[rules]
SSN = "BLOCK"
CREDIT_CARD = "maybe"
"#,
        )
        .unwrap();
        let config = stored.resolve();
        assert!(!config.enable_warn);
        assert!(!config.enable_block);
        assert_eq!(config.rules, RuleMap::allow_all());
    }

    #[test]
    fn test_non_string_rule_value_is_parse_error() {
        let err = StoredConfig::from_json_str(r#"{"rules":{"IBAN":3}}"#).unwrap_err();
        assert!(matches!(err, FenceError::Json(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = PolicyConfig::for_preset_id("health").unwrap().with_warn(false);
        let stored = StoredConfig::from(&config);
        assert!(stored.rules.is_none());
        let text = stored.to_toml_string().unwrap();
        let back = StoredConfig::from_toml_str(&text).unwrap().resolve();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("settings.json");
        let mut f = std::fs::File::create(&json_path).unwrap();
        write!(f, r#"{{"preset":"workplace"}}"#).unwrap();
        assert_eq!(
            StoredConfig::load(&json_path).unwrap().preset.as_deref(),
            Some("workplace")
        );

        let toml_path = dir.path().join("config.toml");
        std::fs::write(&toml_path, "preset = \"health\"\n").unwrap();
        assert_eq!(StoredConfig::load(&toml_path).unwrap().resolve().preset.id, "health");

        assert!(matches!(
            StoredConfig::load(dir.path().join("missing.toml")),
            Err(FenceError::Io(_))
        ));
    }
}
