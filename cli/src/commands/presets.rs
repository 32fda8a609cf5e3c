//! Presets commands

use crate::output::{self, OutputFormat};
use crate::PresetCommands;
use anyhow::{anyhow, Result};
use colored::Colorize;
use promptfence_core::{ActionLevel, DataType, Preset};
use tabled::Tabled;

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Blocks")]
    blocks: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

#[derive(Tabled)]
pub(crate) struct RuleRow {
    #[tabled(rename = "Type")]
    pub id: &'static str,
    #[tabled(rename = "Label")]
    pub label: &'static str,
    #[tabled(rename = "Action")]
    pub action: ActionLevel,
}

pub fn handle(action: PresetCommands, format: OutputFormat) -> Result<()> {
    match action {
        PresetCommands::List => {
            if !format.is_table() {
                return format.print(&Preset::all());
            }
            let rows = Preset::all().iter().map(|p| PresetRow {
                id: p.id,
                name: p.copy.name,
                blocks: p
                    .rules
                    .types_with(ActionLevel::Block)
                    .iter()
                    .map(|t| t.id())
                    .collect::<Vec<_>>()
                    .join(", "),
                description: p.copy.description,
            });
            println!("{}", output::table(rows));
        }
        PresetCommands::Show { id } => {
            let preset = Preset::by_id(&id).ok_or_else(|| anyhow!("Unknown preset: {}", id))?;
            if !format.is_table() {
                return format.print(preset);
            }
            println!("{} ({})", preset.copy.name.bold(), preset.id);
            println!("{}", preset.copy.description);
            println!("{}", output::table(rule_rows(preset.rules.iter())));
            println!("{} {}", "Guidance:".bold(), preset.copy.guidance);
        }
    }
    Ok(())
}

pub(crate) fn rule_rows(
    rules: impl Iterator<Item = (DataType, ActionLevel)>,
) -> Vec<RuleRow> {
    rules
        .map(|(t, action)| RuleRow {
            id: t.id(),
            label: t.label(),
            action,
        })
        .collect()
}
