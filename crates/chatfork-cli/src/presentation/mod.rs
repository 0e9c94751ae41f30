// Presentation layer: presenters turn engine output into view models, views render
// view models as plain text, the renderer picks plain or JSON.

pub mod presenters;
pub mod renderer;
pub mod view_models;
pub mod views;

pub use renderer::ConsoleRenderer;
pub use view_models::{CommandResultViewModel, CreateView, ViewStyle};
