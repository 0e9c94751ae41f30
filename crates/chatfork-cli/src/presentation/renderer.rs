use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::presentation::view_models::{CommandResultViewModel, CreateView, ViewStyle};
use crate::types::OutputFormat;

pub struct ConsoleRenderer {
    format: OutputFormat,
    style: ViewStyle,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat, style: ViewStyle) -> Self {
        Self { format, style }
    }

    pub fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
    {
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        if let Some(badge) = &result.badge {
            if self.style.color {
                println!("{} {}", badge.icon(), badge.label.bold());
            } else {
                println!("{} {}", badge.icon(), badge.label);
            }
            println!();
        }

        print!("{}", result.content.create_view(self.style));

        if !result.suggestions.is_empty() {
            println!();
            println!("Tips:");
            for tip in &result.suggestions {
                if self.style.color {
                    println!("  • {}: {}", tip.description, tip.command.cyan());
                } else {
                    println!("  • {}: {}", tip.description, tip.command);
                }
            }
        }

        Ok(())
    }
}
