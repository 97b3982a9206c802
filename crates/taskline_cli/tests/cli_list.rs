mod common;

use common::{Sandbox, stdout};

#[test]
fn list_prints_positions_in_order() {
    let sandbox = Sandbox::with_store(&[
        "[T][ ] [H] read book",
        "[E][X] [N] team meeting 2024-05-19 1400 2024-05-19 1600",
    ]);

    let output = sandbox.run(&["list"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Here are the tasks in your list:"));
    assert!(stdout.contains("1.[T][ ] read book (priority: high)"));
    assert!(stdout.contains(
        "2.[E][X] team meeting (from: May 19 2024, 2:00PM to: May 19 2024, 4:00PM)"
    ));
}

#[test]
fn find_returns_matches_with_original_positions() {
    let sandbox = Sandbox::with_store(&["[T][ ] [N] buy milk", "[T][ ] [N] read book"]);

    let output = sandbox.run(&["find", "book"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("2.[T][ ] read book"));
    assert!(!stdout.contains("buy milk"));
}

#[test]
fn find_reports_no_matches() {
    let sandbox = Sandbox::with_store(&["[T][ ] [N] buy milk"]);

    let output = sandbox.run(&["find", "Book"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("No matching tasks found for \"Book\"."));
}

#[test]
fn list_json_includes_task_fields() {
    let sandbox = Sandbox::with_store(&["[D][ ] [L] submit report 2024-05-19 1800"]);

    let output = sandbox.run(&["--json", "list"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["command"], "list");
    assert_eq!(value["tasks"][0]["position"], 1);
    assert_eq!(value["tasks"][0]["type"], "deadline");
    assert_eq!(value["tasks"][0]["priority"], "low");
    assert_eq!(value["tasks"][0]["description"], "submit report");
}

#[test]
fn list_table_renders_rows() {
    let sandbox = Sandbox::with_store(&["[T][ ] [N] read book"]);

    let output = sandbox.run(&["--table", "list"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Description"));
    assert!(stdout.contains("read book"));
}

#[test]
fn aliases_from_config_file_are_applied() {
    let sandbox = Sandbox::with_store(&["[T][ ] [N] read book"]);
    std::fs::write(sandbox.config_path(), r#"{ "aliases": { "ls": "list" } }"#).unwrap();

    let output = sandbox.run(&["ls"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("1.[T][ ] read book"));
}

#[test]
fn aliases_from_overrides_are_applied() {
    let sandbox = Sandbox::with_store(&[]);

    let output = sandbox.run(&["--config-override", "aliases.t=todo", "t", "stretch"]);

    assert!(output.status.success());
    assert_eq!(sandbox.store_content(), "[T][ ] [N] stretch\n");
}
