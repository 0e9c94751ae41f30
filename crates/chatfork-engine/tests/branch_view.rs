use std::collections::{HashMap, HashSet};

use chatfork_engine::{BranchAnnotations, BranchGraph, BranchSelection, resolve_visible};
use chatfork_testing::MessageTree;
use chatfork_testing::fixtures::{SampleFiles, turn_pairs};
use chatfork_testing::messages::{seconds, uuids};
use chatfork_types::CanonicalMessage;

fn visible(
    messages: &[CanonicalMessage],
    selection: &[(&str, usize)],
    show_all: bool,
) -> Vec<String> {
    let graph = BranchGraph::build(messages);
    let selection: HashMap<String, usize> = selection
        .iter()
        .map(|(uuid, branch)| (uuid.to_string(), *branch))
        .collect();
    resolve_visible(messages, &graph, &selection, show_all)
        .into_iter()
        .map(|m| m.uuid.clone())
        .collect()
}

/// A -> B -> D, A -> C -> E, with B answered before C
fn simple_fork() -> Vec<CanonicalMessage> {
    MessageTree::new()
        .root("A", &seconds(0))
        .reply("B", "A", &seconds(1))
        .reply("C", "A", &seconds(2))
        .reply("D", "B", &seconds(3))
        .reply("E", "C", &seconds(4))
        .build()
}

/// Outer fork at A (B, C); inner fork at B (D, E); F follows E
fn nested_forks() -> Vec<CanonicalMessage> {
    MessageTree::new()
        .root("A", &seconds(0))
        .reply("B", "A", &seconds(1))
        .reply("C", "A", &seconds(2))
        .reply("D", "B", &seconds(3))
        .reply("E", "B", &seconds(4))
        .reply("F", "E", &seconds(5))
        .reply("G", "C", &seconds(6))
        .build()
}

#[test]
fn test_turn_pairs_scenario() {
    let doc = chatfork_providers::load_value(
        &turn_pairs(&[
            (Some("hi"), Some("hello")),
            (Some("bye"), Some("later")),
        ]),
        "chat.json",
    )
    .expect("turn pairs load");

    let indices: Vec<usize> = doc.messages.iter().map(|m| m.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    let graph = BranchGraph::build(&doc.messages);
    assert!(!graph.has_forks());

    let all = uuids(&doc.messages);
    for selection in [&[][..], &[("human_0", 1)][..], &[("assistant_1", 5)][..]] {
        assert_eq!(visible(&doc.messages, selection, false), all);
    }
}

#[test]
fn test_default_view_follows_earliest_branch() {
    let messages = simple_fork();
    let graph = BranchGraph::build(&messages);

    let fork = graph.fork("A").expect("fork at A");
    let starts: Vec<&str> = fork.branches.iter().map(|b| b.start_uuid).collect();
    assert_eq!(starts, vec!["B", "C"]);

    assert_eq!(visible(&messages, &[], false), vec!["A", "B", "D"]);
}

#[test]
fn test_selecting_second_branch() {
    let messages = simple_fork();
    assert_eq!(visible(&messages, &[("A", 1)], false), vec!["A", "C", "E"]);
}

#[test]
fn test_show_all_is_identity() {
    let messages = nested_forks();
    let all: Vec<String> = messages.iter().map(|m| m.uuid.clone()).collect();

    for selection in [&[][..], &[("A", 1)][..], &[("A", 0), ("B", 1)][..], &[("Z", 4)][..]] {
        assert_eq!(visible(&messages, selection, true), all);
    }
}

#[test]
fn test_empty_selection_equals_explicit_zero() {
    let messages = nested_forks();
    assert_eq!(
        visible(&messages, &[], false),
        visible(&messages, &[("A", 0), ("B", 0)], false)
    );
}

#[test]
fn test_output_sorted_by_index_for_every_selection() {
    let messages = nested_forks();
    let graph = BranchGraph::build(&messages);

    for outer in 0..2 {
        for inner in 0..2 {
            let selection =
                HashMap::from([("A".to_string(), outer), ("B".to_string(), inner)]);
            let view = resolve_visible(&messages, &graph, &selection, false);
            assert!(view.windows(2).all(|w| w[0].index < w[1].index));
        }
    }
}

#[test]
fn test_branches_partition_fork_descendants() {
    let messages = nested_forks();
    let graph = BranchGraph::build(&messages);

    for fork in graph.fork_points() {
        let mut covered: HashSet<usize> = HashSet::from([fork.point_index]);
        for branch in &fork.branches {
            for message in &branch.messages {
                assert!(covered.insert(message.index), "branches overlap");
            }
        }

        let mut descendants: HashSet<usize> = HashSet::from([fork.point_index]);
        let mut stack = vec![fork.point_uuid];
        while let Some(uuid) = stack.pop() {
            for child in graph.children(uuid) {
                if let Some(message) = graph.message(child) {
                    descendants.insert(message.index);
                }
                stack.push(*child);
            }
        }

        assert_eq!(covered, descendants);
    }
}

#[test]
fn test_nested_fork_selection() {
    let messages = nested_forks();

    assert_eq!(visible(&messages, &[], false), vec!["A", "B", "D"]);
    assert_eq!(visible(&messages, &[("B", 1)], false), vec!["A", "B", "E", "F"]);
    assert_eq!(visible(&messages, &[("A", 1)], false), vec!["A", "C", "G"]);
    // The inner choice is kept but has nothing to show while the outer fork hides it
    assert_eq!(visible(&messages, &[("A", 1), ("B", 1)], false), vec!["A", "C", "G"]);
}

#[test]
fn test_tail_outside_every_branch_is_always_shown() {
    // H lost its parent during export: it is a root, owned by no fork
    let messages = MessageTree::new()
        .root("A", &seconds(0))
        .reply("B", "A", &seconds(1))
        .reply("C", "A", &seconds(2))
        .reply("E", "B", &seconds(3))
        .reply("F", "C", &seconds(4))
        .reply("H", "deleted", &seconds(5))
        .build();

    assert_eq!(visible(&messages, &[("A", 0)], false), vec!["A", "B", "E", "H"]);
    assert_eq!(visible(&messages, &[("A", 1)], false), vec!["A", "C", "F", "H"]);
}

#[test]
fn test_descendant_follows_only_its_branch() {
    // G hangs under E, so it is only reachable through B's branch
    let messages = MessageTree::new()
        .root("A", &seconds(0))
        .reply("B", "A", &seconds(1))
        .reply("C", "A", &seconds(2))
        .reply("E", "B", &seconds(3))
        .reply("F", "C", &seconds(4))
        .reply("G", "E", &seconds(5))
        .build();

    assert_eq!(visible(&messages, &[("A", 0)], false), vec!["A", "B", "E", "G"]);
    assert_eq!(visible(&messages, &[("A", 1)], false), vec!["A", "C", "F"]);
}

#[test]
fn test_dangling_parent_creates_no_fork() {
    let messages = MessageTree::new()
        .root("A", &seconds(0))
        .reply("B", "A", &seconds(1))
        .reply("X", "missing", &seconds(2))
        .reply("Y", "missing", &seconds(3))
        .build();
    let graph = BranchGraph::build(&messages);

    assert!(!graph.has_forks());
    assert_eq!(graph.roots(), &["A", "X", "Y"]);
    assert_eq!(visible(&messages, &[], false), vec!["A", "B", "X", "Y"]);
}

#[test]
fn test_member_listed_before_its_fork_point_stays_visible() {
    // Per-fork filtering only looks past the fork point by index. A branch member
    // that the document lists before the fork point is never hidden by that fork.
    let messages = MessageTree::new()
        .reply("late-child", "A", &seconds(5))
        .root("A", &seconds(0))
        .reply("B", "A", &seconds(1))
        .build();
    let graph = BranchGraph::build(&messages);

    let fork = graph.fork("A").expect("fork at A");
    let starts: Vec<&str> = fork.branches.iter().map(|b| b.start_uuid).collect();
    assert_eq!(starts, vec!["B", "late-child"]);

    assert_eq!(visible(&messages, &[("A", 0)], false), vec!["late-child", "A", "B"]);
}

#[test]
fn test_selection_state_drives_view() {
    let messages = simple_fork();
    let graph = BranchGraph::build(&messages);
    let mut selection = BranchSelection::new();

    let names = |view: Vec<&CanonicalMessage>| -> Vec<String> {
        view.into_iter().map(|m| m.uuid.clone()).collect()
    };

    assert_eq!(names(selection.resolve(&messages, &graph)), vec!["A", "B", "D"]);

    selection.select_branch("A", 1);
    assert_eq!(names(selection.resolve(&messages, &graph)), vec!["A", "C", "E"]);

    selection.toggle_show_all();
    assert_eq!(selection.resolve(&messages, &graph).len(), 5);

    selection.toggle_show_all();
    assert_eq!(names(selection.resolve(&messages, &graph)), vec!["A", "B", "D"]);
}

#[test]
fn test_sample_fork_annotations() {
    let doc = chatfork_providers::load_file(&SampleFiles::new().path("claude_conversation.json"))
        .expect("sample loads");
    let graph = BranchGraph::build(&doc.messages);
    let annotations = BranchAnnotations::compute(&graph);

    let summary: Vec<String> = annotations
        .annotate(&doc.messages)
        .iter()
        .map(|a| {
            format!(
                "{} point={} id={:?} level={}",
                a.message.uuid,
                a.annotation.is_branch_point,
                a.annotation.branch_id,
                a.annotation.branch_level
            )
        })
        .collect();

    insta::assert_snapshot!(summary.join("\n"), @r"
    u1 point=true id=None level=0
    a1 point=false id=Some(0) level=1
    a2 point=false id=Some(1) level=1
    u2 point=false id=Some(1) level=1
    a3 point=false id=Some(1) level=1
    ");

    let fork = graph.fork("u1").expect("fork at u1");
    assert_eq!(fork.branches[0].preview_text, "Here is a version using slices.");
    assert_eq!(fork.branches[1].preview_text, "The standard library already provides one.");
}
