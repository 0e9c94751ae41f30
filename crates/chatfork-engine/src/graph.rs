use std::collections::{HashMap, HashSet};

use chatfork_types::CanonicalMessage;
use tracing::{debug, warn};

use crate::timestamp::sort_key;

/// Characters of the start message shown in a branch preview
const PREVIEW_CHARS: usize = 50;

/// One child line of a fork point: the child plus its full descendant closure
#[derive(Debug, Clone)]
pub struct Branch<'a> {
    pub start_uuid: &'a str,
    /// Every reachable descendant, nested sub-forks included, sorted by `index`
    pub messages: Vec<&'a CanonicalMessage>,
    pub message_count: usize,
    pub preview_text: String,
    members: HashSet<usize>,
}

impl<'a> Branch<'a> {
    /// Whether the message with this `index` belongs to the branch
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }
}

/// A message with two or more valid children
#[derive(Debug, Clone)]
pub struct ForkPoint<'a> {
    pub point_uuid: &'a str,
    pub point_index: usize,
    /// Ordered by first-message timestamp, ties by document order
    pub branches: Vec<Branch<'a>>,
}

impl<'a> ForkPoint<'a> {
    /// Position of the branch containing `index`, if any
    pub fn branch_of(&self, index: usize) -> Option<usize> {
        self.branches.iter().position(|b| b.contains(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanglingKind {
    /// `parent_uuid` names no message in the document
    MissingParent,
    /// `parent_uuid` names the message itself
    SelfParent,
    /// A child list entry that resolves to no message
    MissingChild,
}

/// Unresolvable reference found while building the graph; never fatal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub uuid: String,
    pub missing: String,
    pub kind: DanglingKind,
}

/// Parent/child structure of one message list.
///
/// Rebuilt wholesale whenever the message list or the active conversation scope
/// changes; holds no state of its own beyond what it derives from `messages`.
#[derive(Debug)]
pub struct BranchGraph<'a> {
    messages: &'a [CanonicalMessage],
    by_uuid: HashMap<&'a str, &'a CanonicalMessage>,
    children: HashMap<&'a str, Vec<&'a str>>,
    roots: Vec<&'a str>,
    forks: Vec<ForkPoint<'a>>,
    fork_by_uuid: HashMap<&'a str, usize>,
    dangling: Vec<DanglingReference>,
}

impl<'a> BranchGraph<'a> {
    pub fn build(messages: &'a [CanonicalMessage]) -> Self {
        let mut by_uuid: HashMap<&'a str, &'a CanonicalMessage> = HashMap::new();
        let mut duplicates: HashSet<usize> = HashSet::new();

        for message in messages {
            if by_uuid.contains_key(message.uuid.as_str()) {
                warn!(
                    uuid = %message.uuid,
                    index = message.index,
                    "duplicate message uuid, keeping the first occurrence"
                );
                duplicates.insert(message.index);
                continue;
            }
            by_uuid.insert(message.uuid.as_str(), message);
        }

        let mut children: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        let mut roots = Vec::new();
        let mut dangling = Vec::new();

        for message in messages {
            if duplicates.contains(&message.index) {
                continue;
            }
            let Some(parent) = message.parent() else {
                roots.push(message.uuid.as_str());
                continue;
            };

            if parent == message.uuid {
                dangling.push(dangling_ref(message, DanglingKind::SelfParent));
                roots.push(message.uuid.as_str());
            } else if by_uuid.contains_key(parent) {
                children.entry(parent).or_default().push(message.uuid.as_str());
            } else {
                dangling.push(dangling_ref(message, DanglingKind::MissingParent));
                roots.push(message.uuid.as_str());
            }
        }

        let mut graph = Self {
            messages,
            by_uuid,
            children,
            roots,
            forks: Vec::new(),
            fork_by_uuid: HashMap::new(),
            dangling,
        };
        graph.find_forks();

        debug!(
            messages = messages.len(),
            forks = graph.forks.len(),
            roots = graph.roots.len(),
            dangling = graph.dangling.len(),
            "built branch graph"
        );
        graph
    }

    fn find_forks(&mut self) {
        let mut forks = Vec::new();

        for message in self.messages {
            let uuid = message.uuid.as_str();
            // Duplicates share the uuid of their first occurrence
            if !self
                .by_uuid
                .get(uuid)
                .is_some_and(|m| std::ptr::eq(*m, message))
            {
                continue;
            }

            let mut starts: Vec<&'a CanonicalMessage> = self
                .children(uuid)
                .iter()
                .filter_map(|child| self.by_uuid.get(child).copied())
                .collect();
            if starts.len() < 2 {
                continue;
            }
            starts.sort_by_key(|m| (sort_key(&m.timestamp), m.index));

            let branches = starts
                .into_iter()
                .map(|start| self.collect_branch(start))
                .collect();
            forks.push(ForkPoint {
                point_uuid: uuid,
                point_index: message.index,
                branches,
            });
        }

        forks.sort_by_key(|f| f.point_index);
        self.fork_by_uuid = forks
            .iter()
            .enumerate()
            .map(|(i, f)| (f.point_uuid, i))
            .collect();
        self.forks = forks;
    }

    /// Iterative depth-first walk of every descendant of `start`
    fn collect_branch(&mut self, start: &'a CanonicalMessage) -> Branch<'a> {
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut stack = vec![start.uuid.as_str()];
        let mut messages = Vec::new();

        while let Some(uuid) = stack.pop() {
            if !visited.insert(uuid) {
                continue;
            }
            let Some(message) = self.by_uuid.get(uuid).copied() else {
                self.dangling.push(DanglingReference {
                    uuid: start.uuid.clone(),
                    missing: uuid.to_string(),
                    kind: DanglingKind::MissingChild,
                });
                continue;
            };
            messages.push(message);
            if let Some(children) = self.children.get(uuid) {
                stack.extend(children.iter().rev().copied());
            }
        }

        messages.sort_by_key(|m| m.index);
        let members = messages.iter().map(|m| m.index).collect();

        Branch {
            start_uuid: start.uuid.as_str(),
            message_count: messages.len(),
            preview_text: preview(&start.display_text),
            messages,
            members,
        }
    }

    pub fn messages(&self) -> &'a [CanonicalMessage] {
        self.messages
    }

    pub fn message(&self, uuid: &str) -> Option<&'a CanonicalMessage> {
        self.by_uuid.get(uuid).copied()
    }

    /// Valid children of `uuid`, in document order
    pub fn children(&self, uuid: &str) -> &[&'a str] {
        self.children.get(uuid).map(Vec::as_slice).unwrap_or_default()
    }

    /// Messages with no resolvable parent, in document order
    pub fn roots(&self) -> &[&'a str] {
        &self.roots
    }

    /// Fork points in ascending point index
    pub fn fork_points(&self) -> &[ForkPoint<'a>] {
        &self.forks
    }

    pub fn fork(&self, uuid: &str) -> Option<&ForkPoint<'a>> {
        self.fork_by_uuid.get(uuid).map(|&i| &self.forks[i])
    }

    pub fn is_fork_point(&self, uuid: &str) -> bool {
        self.fork_by_uuid.contains_key(uuid)
    }

    pub fn has_forks(&self) -> bool {
        !self.forks.is_empty()
    }

    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }
}

fn dangling_ref(message: &CanonicalMessage, kind: DanglingKind) -> DanglingReference {
    debug!(
        uuid = %message.uuid,
        parent = %message.parent_uuid,
        ?kind,
        "unresolvable parent, treating message as a root"
    );
    DanglingReference {
        uuid: message.uuid.clone(),
        missing: message.parent_uuid.clone(),
        kind,
    }
}

/// First line-collapsed 50 characters of `text`, or `"..."` when empty
pub fn preview(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "...".to_string();
    }
    if collapsed.chars().count() <= PREVIEW_CHARS {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}
