use serde::Serialize;

/// Envelope every command renders: optional status line, the payload, follow-up hints
#[derive(Debug, Serialize)]
pub struct CommandResultViewModel<T>
where
    T: Serialize,
{
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<StatusBadge>,

    pub content: T,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Guidance>,
}

impl<T> CommandResultViewModel<T>
where
    T: Serialize,
{
    pub fn new(content: T) -> Self {
        Self {
            badge: None,
            content,
            suggestions: Vec::new(),
        }
    }

    pub fn with_info(mut self, label: impl Into<String>) -> Self {
        self.badge = Some(StatusBadge {
            level: StatusLevel::Info,
            label: label.into(),
        });
        self
    }

    /// Warnings replace an info badge; an existing warning is kept
    pub fn with_warning(mut self, label: impl Into<String>) -> Self {
        if !matches!(&self.badge, Some(b) if b.level == StatusLevel::Warning) {
            self.badge = Some(StatusBadge {
                level: StatusLevel::Warning,
                label: label.into(),
            });
        }
        self
    }

    pub fn suggest(mut self, description: impl Into<String>, command: impl Into<String>) -> Self {
        self.suggestions.push(Guidance {
            description: description.into(),
            command: command.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusBadge {
    pub level: StatusLevel,
    pub label: String,
}

impl StatusBadge {
    pub fn icon(&self) -> &str {
        match self.level {
            StatusLevel::Info => "ℹ️",
            StatusLevel::Warning => "⚠️",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Warning,
}

/// A follow-up command worth running next
#[derive(Debug, Clone, Serialize)]
pub struct Guidance {
    pub description: String,
    pub command: String,
}
