//! Built-in policy presets
//!
//! Preset ids are stable strings shared with stored configuration and must
//! not change: `personal`, `finance`, `health`, `workplace`, `developer`.

use crate::policy::{ActionLevel, RuleMap};
use serde::Serialize;

use ActionLevel::{Allow as A, Block as B, Warn as W};

/// Dialog copy for one action level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModalCopy {
    /// Dialog title
    pub title: &'static str,
    /// Dialog body
    pub body: &'static str,
}

/// User-facing text attached to a preset.
///
/// Opaque to detection and evaluation; carried for the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetCopy {
    /// Display name
    pub name: &'static str,
    /// One-sentence description
    pub description: &'static str,
    /// Guidance shown under a warning or block
    pub guidance: &'static str,
    /// Copy for WARN decisions
    pub warn: ModalCopy,
    /// Copy for BLOCK decisions
    pub block: ModalCopy,
}

/// Named, immutable policy template
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// Stable identifier
    pub id: &'static str,
    /// Per-type actions
    pub rules: RuleMap,
    /// UI copy
    #[serde(rename = "uiCopy")]
    pub copy: PresetCopy,
}

//                        EMAIL PHONE IBAN CARD ADDR PASSWORD
static PRESETS: [Preset; 5] = [
    Preset {
        id: "personal",
        rules: RuleMap::new(W, W, W, B, A, B),
        copy: PresetCopy {
            name: "Personal",
            description: "Everyday protection for contact details, cards and passwords.",
            guidance: "Anonymize personal details before sharing them with an AI assistant.",
            warn: ModalCopy {
                title: "Personal information detected",
                body: "This text contains personal details. Consider anonymizing before you paste.",
            },
            block: ModalCopy {
                title: "Sensitive data blocked",
                body: "This text contains data that should never be shared with an AI assistant.",
            },
        },
    },
    Preset {
        id: "finance",
        rules: RuleMap::new(W, W, B, B, W, B),
        copy: PresetCopy {
            name: "Finance",
            description: "Strict handling of bank accounts and payment cards.",
            guidance: "Account and card numbers must be removed before sharing.",
            warn: ModalCopy {
                title: "Customer information detected",
                body: "This text contains customer contact details. Review before pasting.",
            },
            block: ModalCopy {
                title: "Financial data blocked",
                body: "Bank account or card numbers cannot be shared with AI assistants.",
            },
        },
    },
    Preset {
        id: "health",
        rules: RuleMap::new(W, W, W, B, B, B),
        copy: PresetCopy {
            name: "Health",
            description: "Protects patient contact and location details.",
            guidance: "Patient identifiers and addresses must be removed before sharing.",
            warn: ModalCopy {
                title: "Patient information detected",
                body: "This text may identify a patient. Consider anonymizing before you paste.",
            },
            block: ModalCopy {
                title: "Patient data blocked",
                body: "Addresses and payment details cannot be shared with AI assistants.",
            },
        },
    },
    Preset {
        id: "workplace",
        rules: RuleMap::new(W, A, W, B, A, B),
        copy: PresetCopy {
            name: "Workplace",
            description: "Balanced rules for internal documents and email threads.",
            guidance: "Strip credentials and customer identifiers from internal material.",
            warn: ModalCopy {
                title: "Internal information detected",
                body: "This text contains identifiers from internal material. Review before pasting.",
            },
            block: ModalCopy {
                title: "Confidential data blocked",
                body: "Credentials and card numbers cannot be shared with AI assistants.",
            },
        },
    },
    Preset {
        id: "developer",
        rules: RuleMap::new(A, A, W, B, A, B),
        copy: PresetCopy {
            name: "Developer",
            description: "Focused on secrets: API keys, tokens and passwords in code and logs.",
            guidance: "Rotate any credential that was exposed and use placeholders in snippets.",
            warn: ModalCopy {
                title: "Possible account number detected",
                body: "This snippet contains what looks like a bank account number.",
            },
            block: ModalCopy {
                title: "Secret blocked",
                body: "This snippet contains a credential. Remove it before pasting.",
            },
        },
    },
];

impl Preset {
    /// Id of the default preset
    pub const DEFAULT_ID: &'static str = "personal";

    /// All presets in display order
    pub fn all() -> &'static [Preset] {
        &PRESETS
    }

    /// Look up a preset by id (exact match)
    pub fn by_id(id: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.id == id)
    }

    /// The `personal` preset
    pub fn default_preset() -> &'static Preset {
        &PRESETS[0]
    }

    /// Modal copy for an action; `None` for ALLOW
    pub fn modal(&self, action: ActionLevel) -> Option<&ModalCopy> {
        match action {
            ActionLevel::Allow => None,
            ActionLevel::Warn => Some(&self.copy.warn),
            ActionLevel::Block => Some(&self.copy.block),
        }
    }
}
