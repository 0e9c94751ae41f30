use std::io::stdout;

use anyhow::Result;
use is_terminal::IsTerminal;
use serde::Serialize;

use crate::config::Config;
use crate::presentation::{CommandResultViewModel, ConsoleRenderer, CreateView, ViewStyle};
use crate::types::{ColorMode, OutputFormat};

/// Context for handler execution with consistent presentation utilities
pub struct HandlerContext {
    pub format: OutputFormat,
    pub config: Config,
    style: ViewStyle,
}

impl HandlerContext {
    pub fn new(format: OutputFormat, config: Config, color_override: Option<ColorMode>) -> Self {
        let mode = color_override.unwrap_or(config.view.color);
        let color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => stdout().is_terminal(),
        };

        Self {
            format,
            config,
            style: ViewStyle { color },
        }
    }

    /// Render a view model using the configured format and color style
    pub fn render<T>(&self, view_model: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
    {
        ConsoleRenderer::new(self.format, self.style).render(view_model)
    }
}
