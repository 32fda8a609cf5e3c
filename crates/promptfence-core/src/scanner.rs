//! Scanner combining all detectors

use crate::detector::{default_detectors, detector_for, Detector};
use crate::resolve::resolve;
use crate::types::{DataType, Match};
use once_cell::sync::Lazy;
use tracing::debug;

/// Ordered set of detectors.
///
/// Stateless after construction; share one instance across threads.
pub struct Scanner {
    detectors: Vec<Box<dyn Detector>>,
}

impl Scanner {
    /// Scanner running every detector in detector order
    pub fn new() -> Self {
        Self {
            detectors: default_detectors(),
        }
    }

    /// Scanner limited to `types`, still run in detector order
    pub fn with_types(types: &[DataType]) -> Self {
        let detectors = DataType::ALL
            .into_iter()
            .filter(|t| types.contains(t))
            .map(detector_for)
            .collect();
        Self { detectors }
    }

    /// Raw candidates from every detector, in emission order.
    ///
    /// Spans may overlap across types.
    pub fn candidates<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        self.detectors
            .iter()
            .flat_map(|d| d.detect(text))
            .collect()
    }

    /// Detect and resolve: sorted, non-overlapping matches
    pub fn scan<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        if text.is_empty() {
            return Vec::new();
        }

        let candidates = self.candidates(text);
        let candidate_count = candidates.len();
        let resolved = resolve(candidates);

        debug!(
            input_len = text.len(),
            candidates = candidate_count,
            resolved = resolved.len(),
            "scan complete"
        );
        resolved
    }

    /// Types this scanner detects, in detector order
    pub fn data_types(&self) -> Vec<DataType> {
        self.detectors.iter().map(|d| d.data_type()).collect()
    }

    /// Get detector count
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_SCANNER: Lazy<Scanner> = Lazy::new(Scanner::new);

/// Scan `text` with every detector and resolve overlaps
pub fn detect(text: &str) -> Vec<Match<'_>> {
    DEFAULT_SCANNER.scan(text)
}
