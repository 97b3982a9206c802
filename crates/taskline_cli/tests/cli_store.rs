mod common;

use common::{Sandbox, stderr, stdout};

#[test]
fn missing_store_is_fatal_at_startup() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["list"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("ERROR: io_error"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn init_creates_an_empty_store() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["--init", "list"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Your task list is empty."));
    assert_eq!(sandbox.store_content(), "");
}

#[test]
fn corrupt_record_is_reported_with_its_line() {
    let sandbox = Sandbox::with_store(&["[T][ ] [N] fine", "garbage line"]);

    let output = sandbox.run(&["list"]);

    assert!(!output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("ERROR: invalid_data"));
    assert!(stderr.contains("line 2"));
}

#[test]
fn store_flag_overrides_environment() {
    let sandbox = Sandbox::new();
    let other = sandbox.path().join("elsewhere.txt");
    std::fs::write(&other, "[T][X] [N] from flag\n").unwrap();

    let output = sandbox.run(&["--store", other.to_str().unwrap(), "list"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("1.[T][X] from flag"));
}
