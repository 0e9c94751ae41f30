use std::fmt;

use chatfork_engine::graph::preview;

use crate::presentation::view_models::{
    CreateView, ForkListViewModel, ThreadMessageViewModel, ThreadViewModel, ViewStyle,
};
use crate::presentation::views::Palette;

impl CreateView for ForkListViewModel {
    fn create_view<'a>(&'a self, style: ViewStyle) -> Box<dyn fmt::Display + 'a> {
        Box::new(ForkListView {
            data: self,
            palette: Palette::new(style),
        })
    }
}

struct ForkListView<'a> {
    data: &'a ForkListViewModel,
    palette: Palette,
}

impl<'a> fmt::Display for ForkListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.forks.is_empty() {
            writeln!(f, "No forks: the conversation is a single thread.")?;
            return Ok(());
        }

        let p = self.palette;
        for fork in &self.data.forks {
            writeln!(
                f,
                "{} {} {}",
                p.heading("Fork at"),
                p.accent(&fork.point_uuid),
                p.dim(&format!("(#{})", fork.point_index))
            )?;
            for branch in &fork.branches {
                writeln!(
                    f,
                    "  [{}] {:<38} {:>4} msgs  {}",
                    branch.position, branch.start_uuid, branch.message_count, branch.preview
                )?;
            }
        }
        Ok(())
    }
}

impl CreateView for ThreadViewModel {
    fn create_view<'a>(&'a self, style: ViewStyle) -> Box<dyn fmt::Display + 'a> {
        Box::new(ThreadView {
            data: self,
            palette: Palette::new(style),
        })
    }
}

struct ThreadView<'a> {
    data: &'a ThreadViewModel,
    palette: Palette,
}

impl<'a> ThreadView<'a> {
    fn render_message(&self, f: &mut fmt::Formatter<'_>, entry: &ThreadMessageViewModel) -> fmt::Result {
        let p = self.palette;
        let message = &entry.message;
        let indent = "  ".repeat(entry.annotation.branch_level);

        let mut header = format!("{}#{} {}", indent, message.index, p.heading(&message.sender_label));
        if !message.timestamp.is_empty() {
            header.push(' ');
            header.push_str(&p.dim(&message.timestamp));
        }
        if let Some(branch) = entry.annotation.branch_id {
            header.push(' ');
            header.push_str(&p.dim(&format!("[branch {}]", branch)));
        }
        writeln!(f, "{}", header)?;

        if message.has_thinking() {
            writeln!(f, "{}  {}", indent, p.dim(&format!("(thinking) {}", preview(&message.thinking))))?;
        }
        for line in message.display_text.lines() {
            writeln!(f, "{}  {}", indent, line)?;
        }
        for tool in &message.tools {
            let label = match &tool.query {
                Some(query) => format!("{}: {}", tool.name, query),
                None => tool.name.clone(),
            };
            writeln!(f, "{}  {}", indent, p.accent(&format!("[tool] {}", label)))?;
        }
        for artifact in &message.artifacts {
            let title = artifact.title.as_deref().unwrap_or(&artifact.id);
            writeln!(
                f,
                "{}  {}",
                indent,
                p.accent(&format!("[artifact {}] {}", artifact.command, title))
            )?;
        }
        if !message.images.is_empty() || !message.attachments.is_empty() {
            writeln!(
                f,
                "{}  {}",
                indent,
                p.dim(&format!(
                    "({} image(s), {} attachment(s))",
                    message.images.len(),
                    message.attachments.len()
                ))
            )?;
        }

        if let Some(switch) = entry.switch {
            let marker = if self.data.show_all {
                format!("<fork: {} branches>", switch.branch_count)
            } else {
                format!("<branch {}/{}>", switch.selected + 1, switch.branch_count)
            };
            writeln!(f, "{}  {}", indent, p.warn(&marker))?;
        }
        writeln!(f)
    }
}

impl<'a> fmt::Display for ThreadView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.messages.is_empty() {
            writeln!(f, "No messages.")?;
            return Ok(());
        }

        for entry in &self.data.messages {
            self.render_message(f, entry)?;
        }
        Ok(())
    }
}
