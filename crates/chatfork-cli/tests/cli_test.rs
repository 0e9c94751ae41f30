use assert_cmd::cargo::cargo_bin_cmd;
use chatfork_testing::TestWorld;
use chatfork_testing::assertions::{assert_fork_count, assert_message_uuids};
use chatfork_testing::fixtures::{forked_conversation, turn_pairs};
use predicates::prelude::*;
use serde_json::Value;

const SAMPLE: &str = "claude_conversation.json";

fn exported_uuids(messages: &Value) -> Vec<String> {
    messages
        .as_array()
        .expect("message array")
        .iter()
        .map(|m| m["uuid"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_inspect_reports_metadata_and_forks() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let result = world.run(&["--format", "json", "inspect", SAMPLE]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    let content = &json["content"];
    assert_eq!(content["title"], "Binary search in Rust");
    assert_eq!(content["platform"], "Claude");
    assert_eq!(content["format"], "rich_conversation");
    assert_eq!(content["message_count"], 5);
    assert_eq!(content["selected"]["fork_count"], 1);
    assert_eq!(content["selected"]["root_count"], 1);
    assert!(json.get("badge").is_none());
}

#[test]
fn test_forks_lists_branches_in_order() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let result = world.run(&["--format", "json", "forks", SAMPLE]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_fork_count(&json["content"], 1).unwrap();
    insta::assert_json_snapshot!(json["content"]["forks"], @r#"
    [
      {
        "branches": [
          {
            "message_count": 1,
            "position": 0,
            "preview": "Here is a version using slices.",
            "start_uuid": "a1"
          },
          {
            "message_count": 3,
            "position": 1,
            "preview": "The standard library already provides one.",
            "start_uuid": "a2"
          }
        ],
        "point_index": 0,
        "point_uuid": "u1"
      }
    ]
    "#);
}

#[test]
fn test_forks_plain_without_forks() {
    let world = TestWorld::new().with_document(
        "pairs.json",
        &turn_pairs(&[(Some("hi"), Some("hello"))]),
    );

    let result = world.run(&["forks", "pairs.json"]).unwrap();
    assert!(result.success());
    assert!(result.stdout().contains("No forks"));
}

#[test]
fn test_view_follows_selection() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let default = world.run(&["--format", "json", "view", SAMPLE]).unwrap();
    assert!(default.success(), "stderr: {}", default.stderr());
    let json = default.json().unwrap();
    assert_message_uuids(&json["content"], &["u1", "a1"]).unwrap();
    assert_eq!(json["content"]["messages"][0]["isBranchPoint"], true);
    assert_eq!(json["content"]["messages"][0]["switch"]["branchCount"], 2);

    let second = world
        .run(&["--format", "json", "view", SAMPLE, "--select", "u1=1"])
        .unwrap();
    let json = second.json().unwrap();
    assert_message_uuids(&json["content"], &["u1", "a2", "u2", "a3"]).unwrap();
    assert_eq!(json["content"]["messages"][3]["branchId"], 1);
    assert_eq!(json["content"]["messages"][3]["branchLevel"], 1);

    let all = world.run(&["--format", "json", "view", SAMPLE, "--all"]).unwrap();
    let json = all.json().unwrap();
    assert_eq!(json["content"]["show_all"], true);
    assert_eq!(json["content"]["messages"].as_array().unwrap().len(), 5);
}

#[test]
fn test_view_out_of_range_selection_falls_back() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let result = world
        .run(&["--format", "json", "view", SAMPLE, "--select", "u1=9"])
        .unwrap();
    assert!(result.success());
    assert_message_uuids(&result.json().unwrap()["content"], &["u1", "a1"]).unwrap();
    assert!(result.stderr().contains("out of range"));
}

#[test]
fn test_view_plain_marks_fork_without_color() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let result = world
        .run(&["--color", "never", "view", SAMPLE, "--select", "u1=1"])
        .unwrap();
    assert!(result.success());

    let stdout = result.stdout();
    assert!(stdout.contains("<branch 2/2>"));
    assert!(stdout.contains("message(s) on other branches hidden"));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_view_rejects_malformed_selection() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let result = world.run(&["view", SAMPLE, "--select", "u1"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Error:"));
    assert!(result.stderr().contains("<fork-uuid>=<branch>"));
}

#[test]
fn test_export_respects_flags() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let full = world.run(&["export", SAMPLE, "--all"]).unwrap();
    assert!(full.success(), "stderr: {}", full.stderr());
    let messages = full.json().unwrap();
    assert!(messages.as_array().unwrap().iter().any(|m| m.get("thinking").is_some()));

    let trimmed = world
        .run(&["export", SAMPLE, "--all", "--no-thinking", "--no-timestamps"])
        .unwrap();
    let messages = trimmed.json().unwrap();
    for message in messages.as_array().unwrap() {
        assert!(message.get("thinking").is_none());
        assert_eq!(message["timestamp"], "");
        assert!(message.get("displayText").is_some());
    }
}

#[test]
fn test_export_marked_only() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let result = world
        .run(&["export", SAMPLE, "--all", "--marked", "0,2"])
        .unwrap();
    assert!(result.success());
    assert_eq!(exported_uuids(&result.json().unwrap()), vec!["u1", "a2"]);

    // Marks on hidden messages are not exported
    let result = world.run(&["export", SAMPLE, "--marked", "0,2"]).unwrap();
    assert_eq!(exported_uuids(&result.json().unwrap()), vec!["u1"]);
}

#[test]
fn test_export_to_file() {
    let world = TestWorld::new().with_document("chat.json", &forked_conversation());

    let result = world
        .run(&["export", "chat.json", "--select", "u1=1", "--output", "out.json"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Wrote 3 messages"));

    let written = std::fs::read_to_string(world.path("out.json")).unwrap();
    let messages: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(exported_uuids(&messages), vec!["u1", "a2", "u2"]);
}

#[test]
fn test_export_conversation_of_multi_export() {
    let world = TestWorld::new().with_sample("claude_export.json");

    let result = world
        .run(&["export", "claude_export.json", "--conversation", "1"])
        .unwrap();
    assert!(result.success());
    let messages = result.json().unwrap();
    let indices: Vec<u64> = messages
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["index"].as_u64().unwrap())
        .collect();
    assert_eq!(indices, vec![2, 3]);

    let missing = world
        .run(&["inspect", "claude_export.json", "--conversation", "5"])
        .unwrap();
    assert!(!missing.success());
    assert!(missing.stderr().contains("out of range"));
}

#[test]
fn test_config_defaults_apply() {
    let world = TestWorld::new()
        .with_sample(SAMPLE)
        .with_config("[view]\nshow_all = true\n\n[export]\ninclude_citations = false\n");

    let view = world.run(&["--format", "json", "view", SAMPLE]).unwrap();
    assert!(view.success(), "stderr: {}", view.stderr());
    assert_eq!(view.json().unwrap()["content"]["messages"].as_array().unwrap().len(), 5);

    let export = world.run(&["export", SAMPLE]).unwrap();
    let messages = export.json().unwrap();
    assert!(messages.as_array().unwrap().iter().all(|m| m.get("citations").is_none()));
}

#[test]
fn test_explicit_config_flag_wins_over_env() {
    let world = TestWorld::new()
        .with_sample(SAMPLE)
        .with_file("other.toml", "[view]\nshow_all = true\n");

    let result = world
        .run(&["--format", "json", "--config", "other.toml", "view", SAMPLE])
        .unwrap();
    assert!(result.success());
    assert_eq!(result.json().unwrap()["content"]["messages"].as_array().unwrap().len(), 5);
}

#[test]
fn test_invalid_config_is_an_error() {
    let world = TestWorld::new()
        .with_sample(SAMPLE)
        .with_config("[view]\nshow_all = \"yes\"\n");

    let result = world.run(&["inspect", SAMPLE]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Invalid config"));
}

#[test]
fn test_unsupported_document_fails() {
    let world = TestWorld::new().with_file("notes.json", r#"{"notes": "nothing here"}"#);

    let mut cmd = cargo_bin_cmd!("chatfork");
    world.configure_command(&mut cmd).arg("inspect").arg("notes.json");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("Unsupported format")));
}

#[test]
fn test_malformed_document_fails() {
    let world = TestWorld::new().with_file("broken.json", "{\"chat_messages\": [");

    let result = world.run(&["view", "broken.json"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Malformed document"));
}

#[test]
fn test_missing_file_fails() {
    let world = TestWorld::new();

    let result = world.run(&["forks", "absent.json"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Failed to load"));
}

#[test]
fn test_rust_log_overrides_log_level() {
    let quiet = TestWorld::new().with_sample(SAMPLE);
    let result = quiet.run(&["inspect", SAMPLE]).unwrap();
    assert!(!result.stderr().contains("loaded document"));

    let verbose = TestWorld::new()
        .with_sample(SAMPLE)
        .with_env("RUST_LOG", "info");
    let result = verbose.run(&["inspect", SAMPLE]).unwrap();
    assert!(result.success());
    assert!(result.stderr().contains("loaded document"));

    let flag = TestWorld::new().with_sample(SAMPLE);
    let result = flag.run(&["--log-level", "debug", "inspect", SAMPLE]).unwrap();
    assert!(result.stderr().contains("detected document format"));
}

#[test]
fn test_select_on_unknown_fork_warns() {
    let world = TestWorld::new().with_sample(SAMPLE);

    let result = world
        .run(&["--format", "json", "view", SAMPLE, "--select", "u9=1"])
        .unwrap();
    assert!(result.success());
    assert!(result.stderr().contains("names no fork point"));
    assert!(result.stderr().contains("u9"));
    assert_message_uuids(&result.json().unwrap()["content"], &["u1", "a1"]).unwrap();
}
