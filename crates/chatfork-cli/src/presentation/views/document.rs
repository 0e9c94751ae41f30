use std::fmt;

use crate::presentation::view_models::{
    CreateView, DocumentSummaryViewModel, ExportResultViewModel, ViewStyle,
};
use crate::presentation::views::Palette;

impl CreateView for DocumentSummaryViewModel {
    fn create_view<'a>(&'a self, style: ViewStyle) -> Box<dyn fmt::Display + 'a> {
        Box::new(DocumentSummaryView {
            data: self,
            palette: Palette::new(style),
        })
    }
}

struct DocumentSummaryView<'a> {
    data: &'a DocumentSummaryViewModel,
    palette: Palette,
}

impl<'a> fmt::Display for DocumentSummaryView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.data;
        let p = self.palette;

        writeln!(f, "{}", p.heading(&d.title))?;
        writeln!(f, "  {:<12} {}", "Platform:", d.platform)?;
        writeln!(
            f,
            "  {:<12} {} {}",
            "Format:",
            d.format,
            p.dim(&format!("({})", d.format_description))
        )?;
        writeln!(f, "  {:<12} {}", "File:", d.source_file)?;
        if let Some(model) = &d.model {
            writeln!(f, "  {:<12} {}", "Model:", model)?;
        }
        if let Some(project) = &d.project {
            writeln!(f, "  {:<12} {}", "Project:", project)?;
        }
        if let Some(created_at) = &d.created_at {
            writeln!(f, "  {:<12} {}", "Created:", created_at)?;
        }
        if let Some(exported_at) = &d.exported_at {
            writeln!(f, "  {:<12} {}", "Exported:", exported_at)?;
        }
        writeln!(f, "  {:<12} {}", "Messages:", d.message_count)?;

        if d.conversations.len() > 1 {
            writeln!(f)?;
            writeln!(f, "{}", p.heading("Conversations"))?;
            for conversation in &d.conversations {
                let marker = if conversation.ordinal == d.selected.ordinal { "*" } else { " " };
                writeln!(
                    f,
                    "{} {:>3}  {:<40} {} messages",
                    marker, conversation.ordinal, conversation.title, conversation.message_count
                )?;
            }
        }

        let s = &d.selected;
        writeln!(f)?;
        writeln!(f, "{}", p.heading("Branches"))?;
        writeln!(f, "  {:<12} {}", "Roots:", s.root_count)?;
        writeln!(f, "  {:<12} {}", "Forks:", s.fork_count)?;
        if s.dangling_count > 0 {
            writeln!(
                f,
                "  {:<12} {}",
                "Dangling:",
                p.warn(&s.dangling_count.to_string())
            )?;
        }

        if !d.degradations.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", p.heading("Degradations"))?;
            for degradation in &d.degradations {
                writeln!(f, "  {}", p.warn(degradation))?;
            }
        }

        Ok(())
    }
}

impl CreateView for ExportResultViewModel {
    fn create_view<'a>(&'a self, _style: ViewStyle) -> Box<dyn fmt::Display + 'a> {
        Box::new(ExportResultView { data: self })
    }
}

struct ExportResultView<'a> {
    data: &'a ExportResultViewModel,
}

impl<'a> fmt::Display for ExportResultView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Wrote {} messages to {}",
            self.data.exported_count, self.data.output_path
        )
    }
}
