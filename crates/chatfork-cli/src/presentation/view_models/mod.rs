mod branch;
mod common;
mod document;

pub use branch::*;
pub use common::*;
pub use document::*;

use std::fmt;

/// Plain-text rendering settings shared by every view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStyle {
    pub color: bool,
}

/// Build the plain-text view for a view model
pub trait CreateView {
    fn create_view<'a>(&'a self, style: ViewStyle) -> Box<dyn fmt::Display + 'a>;
}
