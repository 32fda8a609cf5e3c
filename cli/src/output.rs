//! Output formatting

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use promptfence_core::ActionLevel;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print structured data; `Table` falls back to pretty JSON
    pub fn print<T: Serialize>(&self, data: &T) -> Result<()> {
        match self {
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data)?)
            }
        }
        Ok(())
    }

    pub fn is_table(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }
}

pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn action(action: ActionLevel) -> ColoredString {
    match action {
        ActionLevel::Allow => action.id().green().bold(),
        ActionLevel::Warn => action.id().yellow().bold(),
        ActionLevel::Block => action.id().red().bold(),
    }
}
