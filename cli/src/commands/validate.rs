//! Validator and domain commands

use crate::config::Config;
use crate::output::OutputFormat;
use crate::ValidateCommands;
use anyhow::Result;
use colored::Colorize;
use promptfence_core::{iban_checksum_valid, luhn_valid};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CheckResult<'a> {
    check: &'static str,
    value: &'a str,
    valid: bool,
}

impl CheckResult<'_> {
    fn print(&self, format: OutputFormat) -> Result<()> {
        if !format.is_table() {
            return format.print(self);
        }
        let verdict = if self.valid {
            "valid".green().bold()
        } else {
            "invalid".red().bold()
        };
        println!("{}: {} is {}", self.check, self.value, verdict);
        Ok(())
    }
}

pub fn handle(action: ValidateCommands, format: OutputFormat) -> Result<()> {
    let result = match &action {
        ValidateCommands::Iban { value } => CheckResult {
            check: "iban",
            value,
            valid: iban_checksum_valid(value),
        },
        ValidateCommands::Card { value } => CheckResult {
            check: "card",
            value,
            valid: luhn_valid(value),
        },
    };
    result.print(format)
}

pub fn domain(host: &str, profile: Option<&str>, format: OutputFormat) -> Result<()> {
    let domains = Config::load(profile)?.ai_domains();
    CheckResult {
        check: "ai-domain",
        value: host,
        valid: domains.is_ai_domain(host),
    }
    .print(format)
}
