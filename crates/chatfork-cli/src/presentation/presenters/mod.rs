mod branch;
mod document;

pub use branch::{present_forks, present_thread};
pub use document::{present_document_summary, present_export_result};
