use chatfork_engine::{BranchAnnotations, BranchGraph, BranchSelection, BranchState};
use chatfork_types::CanonicalMessage;

use crate::presentation::view_models::{
    BranchSwitchViewModel, BranchViewModel, CommandResultViewModel, ForkListViewModel,
    ForkViewModel, ThreadMessageViewModel, ThreadViewModel,
};

pub fn present_forks(graph: &BranchGraph<'_>) -> CommandResultViewModel<ForkListViewModel> {
    let forks: Vec<ForkViewModel> = graph
        .fork_points()
        .iter()
        .map(|fork| ForkViewModel {
            point_uuid: fork.point_uuid.to_string(),
            point_index: fork.point_index,
            branches: fork
                .branches
                .iter()
                .enumerate()
                .map(|(position, branch)| BranchViewModel {
                    position,
                    start_uuid: branch.start_uuid.to_string(),
                    message_count: branch.message_count,
                    preview: branch.preview_text.clone(),
                })
                .collect(),
        })
        .collect();

    let mut result = CommandResultViewModel::new(ForkListViewModel { forks });

    if let Some(first) = graph.fork_points().first() {
        result = result.suggest(
            "Follow another branch",
            format!("chatfork view <FILE> --select {}=1", first.point_uuid),
        );
    }

    result
}

pub fn present_thread(
    visible: &[&CanonicalMessage],
    graph: &BranchGraph<'_>,
    selection: &BranchSelection,
) -> CommandResultViewModel<ThreadViewModel> {
    let annotations = BranchAnnotations::compute(graph);

    let messages = annotations
        .annotate(visible.iter().copied())
        .into_iter()
        .map(|annotated| {
            let switch = graph.fork(&annotated.message.uuid).map(|fork| {
                let BranchState::Following(requested) = selection.state(fork.point_uuid);
                BranchSwitchViewModel {
                    selected: if requested < fork.branches.len() { requested } else { 0 },
                    branch_count: fork.branches.len(),
                }
            });

            ThreadMessageViewModel {
                message: annotated.message.clone(),
                annotation: annotated.annotation,
                switch,
            }
        })
        .collect();

    let content = ThreadViewModel {
        show_all: selection.is_showing_all(),
        total_count: graph.messages().len(),
        messages,
    };

    let mut result = CommandResultViewModel::new(content);

    let hidden = graph.messages().len().saturating_sub(visible.len());
    if hidden > 0 {
        result = result.with_info(format!("{} message(s) on other branches hidden", hidden));
    }

    result
}
