use chatfork_engine::MessageAnnotation;
use chatfork_types::CanonicalMessage;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ForkListViewModel {
    pub forks: Vec<ForkViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForkViewModel {
    pub point_uuid: String,
    pub point_index: usize,
    pub branches: Vec<BranchViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchViewModel {
    pub position: usize,
    pub start_uuid: String,
    pub message_count: usize,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadViewModel {
    pub show_all: bool,
    pub total_count: usize,
    pub messages: Vec<ThreadMessageViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadMessageViewModel {
    #[serde(flatten)]
    pub message: CanonicalMessage,
    #[serde(flatten)]
    pub annotation: MessageAnnotation,
    /// Present on fork points: which branch the view follows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch: Option<BranchSwitchViewModel>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSwitchViewModel {
    pub selected: usize,
    pub branch_count: usize,
}
