use chatfork_types::{Artifact, ArtifactBody, ArtifactCommand};

use crate::rich::schema::ArtifactInput;

/// Tool name that carries artifact operations
const ARTIFACT_TOOL: &str = "artifacts";

pub(crate) fn is_artifact_tool(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(ARTIFACT_TOOL)
}

/// Build an artifact record from the tool input.
///
/// Returns the artifact plus any field problems found; `create` without `content`
/// and `update` without either string are reported but still produce a record.
pub(crate) fn build_artifact(input: ArtifactInput) -> (Artifact, Vec<(&'static str, String)>) {
    let mut problems = Vec::new();

    let command = match input.command.filter(|c| !c.trim().is_empty()) {
        Some(command) => ArtifactCommand::from(command.trim().to_lowercase()),
        None => {
            problems.push(("command", "missing artifact command".to_string()));
            ArtifactCommand::Other(String::new())
        }
    };

    let id = input.id.unwrap_or_else(|| {
        problems.push(("id", "missing artifact id".to_string()));
        String::new()
    });

    let body = match &command {
        ArtifactCommand::Create => {
            if input.content.is_none() {
                problems.push(("content", "create without content".to_string()));
            }
            ArtifactBody::Full {
                content: input.content.unwrap_or_default(),
                language: input.language,
            }
        }
        ArtifactCommand::Update => {
            if input.old_str.is_none() && input.new_str.is_none() {
                problems.push(("old_str", "update without old_str/new_str".to_string()));
            }
            ArtifactBody::Diff {
                old_str: input.old_str.unwrap_or_default(),
                new_str: input.new_str.unwrap_or_default(),
            }
        }
        ArtifactCommand::Rewrite | ArtifactCommand::Other(_) => match input.content {
            Some(content) => ArtifactBody::Full {
                content,
                language: input.language,
            },
            None => ArtifactBody::Diff {
                old_str: input.old_str.unwrap_or_default(),
                new_str: input.new_str.unwrap_or_default(),
            },
        },
    };

    let artifact = Artifact {
        id,
        command,
        artifact_type: input.artifact_type,
        title: input.title,
        body,
        result: None,
    };
    (artifact, problems)
}
