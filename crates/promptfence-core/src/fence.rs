//! Detection plus evaluation in one call

use crate::anonymize::anonymize;
use crate::policy::{evaluate, Decision, PolicyConfig};
use crate::scanner::Scanner;
use crate::types::{detected_types, DataType, Match};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Result of inspecting one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection<'t> {
    /// Resolved matches, ascending by start
    pub matches: Vec<Match<'t>>,
    /// Distinct types among `matches`
    pub types: BTreeSet<DataType>,
    /// Policy outcome
    pub decision: Decision,
}

impl<'t> Inspection<'t> {
    /// Anonymize the inspected input
    pub fn anonymized(&self, original: &str) -> String {
        anonymize(original, &self.matches)
    }
}

/// Scanner bound to an active policy.
///
/// Cheap to clone. Policy changes go through [`Fence::with_config`], which
/// keeps the compiled scanner and swaps the config value.
#[derive(Clone)]
pub struct Fence {
    scanner: Arc<Scanner>,
    config: PolicyConfig,
}

impl Fence {
    /// Fence with every detector
    pub fn new(config: PolicyConfig) -> Self {
        Self::with_scanner(Arc::new(Scanner::new()), config)
    }

    /// Fence over an existing scanner
    pub fn with_scanner(scanner: Arc<Scanner>, config: PolicyConfig) -> Self {
        Self { scanner, config }
    }

    /// New fence sharing this scanner under `config`
    #[must_use]
    pub fn with_config(&self, config: PolicyConfig) -> Self {
        Self {
            scanner: Arc::clone(&self.scanner),
            config,
        }
    }

    /// Active policy
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Underlying scanner
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Scan `text` and evaluate the detected types
    pub fn inspect<'t>(&self, text: &'t str) -> Inspection<'t> {
        let matches = self.scanner.scan(text);
        let types = detected_types(&matches);
        let decision = evaluate(types.iter().copied(), &self.config);
        Inspection {
            matches,
            types,
            decision,
        }
    }

    /// Anonymize `text` using a previous inspection of the same string
    pub fn anonymize(&self, text: &str, inspection: &Inspection<'_>) -> String {
        inspection.anonymized(text)
    }
}

impl Default for Fence {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl std::fmt::Debug for Fence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fence")
            .field("detectors", &self.scanner.data_types())
            .field("config", &self.config)
            .finish()
    }
}
