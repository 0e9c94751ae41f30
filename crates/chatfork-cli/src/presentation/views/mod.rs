// Views turn view models into plain text; color is applied only when the style asks for it

mod branch;
mod document;

use owo_colors::OwoColorize;

use crate::presentation::view_models::ViewStyle;

/// Applies ANSI styling when enabled, passes text through otherwise
#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    enabled: bool,
}

impl Palette {
    pub(crate) fn new(style: ViewStyle) -> Self {
        Self {
            enabled: style.color,
        }
    }

    pub(crate) fn heading(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn accent(&self, text: &str) -> String {
        if self.enabled {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn warn(&self, text: &str) -> String {
        if self.enabled {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}
