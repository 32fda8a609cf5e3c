//! PromptFence: sensitive-data detection for text bound for AI assistants
//!
//! Scans pasted or typed text for regulated identifiers, resolves
//! overlapping detections, evaluates the result against a policy preset and
//! optionally replaces every detection with a type placeholder.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Inspection Pipeline                      │
//! │                                                             │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │  Detectors  │   │ Validators  │   │ Keyword     │       │
//! │  │ regex, per  │──▶│ mod-97,     │   │ prefilter   │       │
//! │  │ data type   │   │ Luhn        │   │ Aho-Corasick│       │
//! │  └──────┬──────┘   └─────────────┘   └──────┬──────┘       │
//! │         └─────────────────┬─────────────────┘              │
//! │                    ┌──────▼──────┐                         │
//! │                    │  Resolver   │  sorted, disjoint       │
//! │                    └──────┬──────┘                         │
//! │            ┌──────────────┴──────────────┐                 │
//! │     ┌──────▼──────┐               ┌──────▼──────┐          │
//! │     │   Policy    │               │ Anonymizer  │          │
//! │     │  Evaluator  │               │ [EMAIL] ... │          │
//! │     └─────────────┘               └─────────────┘          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stage is a pure function of its input; a [`Scanner`] is compiled
//! once and shared read-only across threads.
//!
//! ```
//! use promptfence_core::{ActionLevel, Fence, PolicyConfig};
//!
//! let fence = Fence::new(PolicyConfig::for_preset_id("finance").unwrap());
//! let text = "Wire it to DE89370400440532013000";
//! let inspection = fence.inspect(text);
//! assert_eq!(inspection.decision.action, ActionLevel::Block);
//! assert_eq!(inspection.anonymized(text), "Wire it to [IBAN]");
//! ```

#![warn(missing_docs)]

pub mod anonymize;
pub mod checksum;
pub mod config;
pub mod detector;
pub mod domains;
pub mod error;
pub mod fence;
pub mod patterns;
pub mod policy;
pub mod preset;
pub mod resolve;
pub mod scanner;
pub mod telemetry;
pub mod types;

pub use anonymize::anonymize;
pub use checksum::{iban_checksum_valid, luhn_valid};
pub use config::StoredConfig;
pub use detector::Detector;
pub use domains::AiDomains;
pub use error::{FenceError, FenceResult};
pub use fence::{Fence, Inspection};
pub use policy::{evaluate, ActionLevel, Decision, PolicyConfig, RuleMap};
pub use preset::Preset;
pub use resolve::resolve;
pub use scanner::{detect, Scanner};
pub use telemetry::TelemetryEvent;
pub use types::{Confidence, DataType, Match};
