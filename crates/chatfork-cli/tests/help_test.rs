use assert_cmd::Command;

#[allow(deprecated)]
fn run_help(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("chatfork").unwrap();
    let output = cmd.args(args).arg("--help").output().unwrap();
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_main_help_lists_commands() {
    let help = run_help(&[]);
    for command in ["inspect", "forks", "view", "export"] {
        assert!(help.contains(command), "missing {} in help", command);
    }
}

#[test]
fn test_export_help_lists_field_flags() {
    let help = run_help(&["export"]);
    for flag in ["--no-thinking", "--no-artifacts", "--no-tools", "--no-citations", "--no-timestamps", "--marked", "--output"] {
        assert!(help.contains(flag), "missing {} in help", flag);
    }
}
