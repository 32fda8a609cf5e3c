//! Hosts where input interception is active

use serde::{Deserialize, Serialize};

/// Default AI chat hosts
pub const DEFAULT_AI_DOMAINS: [&str; 4] = [
    "chat.openai.com",
    "chatgpt.com",
    "claude.ai",
    "gemini.google.com",
];

/// Exact-match host list.
///
/// Subdomains are not implied: `claude.ai` does not cover `www.claude.ai`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AiDomains {
    hosts: Vec<String>,
}

impl AiDomains {
    /// Build from an explicit host list
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `host` is listed (case-sensitive; empty never matches)
    pub fn is_ai_domain(&self, host: &str) -> bool {
        !host.is_empty() && self.hosts.iter().any(|h| h == host)
    }

    /// Listed hosts
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }
}

impl Default for AiDomains {
    fn default() -> Self {
        Self::new(DEFAULT_AI_DOMAINS)
    }
}
