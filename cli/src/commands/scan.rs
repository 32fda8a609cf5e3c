//! Scan command

use crate::config::Config;
use crate::output::{self, OutputFormat};
use crate::ScanArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use promptfence_core::{
    ActionLevel, AiDomains, DataType, Decision, Fence, Inspection, PolicyConfig, TelemetryEvent,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use tabled::Tabled;
use tracing::debug;

/// Exit status when the input is blocked
const BLOCKED_EXIT: u8 = 2;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub preset: &'static str,
    pub decision: Decision,
    pub matches: Vec<MatchRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<TelemetryEvent>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct MatchRow {
    #[serde(rename = "type")]
    #[tabled(rename = "Type")]
    pub data_type: DataType,
    #[tabled(rename = "Start")]
    pub start: usize,
    #[tabled(rename = "End")]
    pub end: usize,
    #[tabled(rename = "Text")]
    pub masked: String,
}

pub fn handle(args: ScanArgs, profile: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let config = Config::load(profile)?;
    let text = read_input(&args)?;
    let fence = Fence::new(policy(&args, &config)?);

    let report = build_report(&fence, &text, &args, &config.ai_domains());
    if format.is_table() {
        print_table(&report);
    } else {
        format.print(&report)?;
    }

    Ok(match report.decision.action {
        ActionLevel::Block => ExitCode::from(BLOCKED_EXIT),
        _ => ExitCode::SUCCESS,
    })
}

fn read_input(args: &ScanArgs) -> Result<String> {
    match &args.file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Configured policy with command-line overrides applied
pub fn policy(args: &ScanArgs, config: &Config) -> Result<PolicyConfig> {
    let base = config.policy.resolve();
    let mut policy = match &args.preset {
        Some(id) => PolicyConfig::for_preset_id(id)?
            .with_warn(base.enable_warn)
            .with_block(base.enable_block),
        None => base,
    };
    if args.no_warn {
        policy = policy.with_warn(false);
    }
    if args.no_block {
        policy = policy.with_block(false);
    }
    Ok(policy)
}

pub fn build_report(fence: &Fence, text: &str, args: &ScanArgs, domains: &AiDomains) -> ScanReport {
    let inspection: Inspection<'_> = fence.inspect(text);

    let event = args.domain.as_deref().and_then(|host| {
        if !domains.is_ai_domain(host) {
            debug!(host, "not an AI domain, no event");
            return None;
        }
        TelemetryEvent::now(
            &inspection.decision,
            fence.config(),
            host,
            env!("CARGO_PKG_VERSION"),
        )
    });

    ScanReport {
        preset: fence.config().preset.id,
        anonymized: args.anonymize.then(|| inspection.anonymized(text)),
        matches: inspection
            .matches
            .iter()
            .map(|m| MatchRow {
                data_type: m.data_type,
                start: m.start,
                end: m.end,
                masked: m.masked(),
            })
            .collect(),
        decision: inspection.decision,
        event,
    }
}

fn print_table(report: &ScanReport) {
    println!(
        "{} {}  (preset {})",
        "Decision:".bold(),
        output::action(report.decision.action),
        report.preset
    );
    if !report.decision.triggering_types.is_empty() {
        let types: Vec<String> = report
            .decision
            .triggering_types
            .iter()
            .map(|t| format!("{} ({})", t.id(), t.label()))
            .collect();
        println!("{} {}", "Triggered by:".bold(), types.join(", "));
    }

    if report.matches.is_empty() {
        println!("No sensitive data found");
    } else {
        println!("{}", output::table(&report.matches));
    }

    if let Some(anonymized) = &report.anonymized {
        println!("{}", "Anonymized:".bold());
        println!("{}", anonymized);
    }
    if let Some(event) = &report.event {
        println!(
            "{} {} on {}",
            "Event:".bold(),
            event.action,
            event.ai_domain
        );
    }
}
