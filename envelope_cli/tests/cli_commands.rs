use serde_json::{json, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .join("envelope_api/tests/fixtures")
        .join(name)
}

fn command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_envelope"));
    cmd.args(args)
        .env_remove("ENVELOPE_CONFIG")
        .env("RUST_LOG", "off");
    cmd
}

fn envelope(args: &[&str]) -> Output {
    command(args).output().expect("binary runs")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn temp_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp input");
    file.write_all(contents.as_bytes()).expect("write temp input");
    file
}

fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("temp path is UTF-8")
}

// -- inspect --

#[test]
fn inspect_page_as_json() {
    let path = fixture("page.json");
    let output = envelope(&["inspect", path.to_str().unwrap(), "--kind", "page", "--output", "json"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["totalPages"], 8);
    assert_eq!(json["items"].as_array().map(Vec::len), Some(3));
}

#[test]
fn inspect_mismatched_page_fails_in_strict_mode() {
    let path = fixture("page_mismatch.json");
    let output = envelope(&["inspect", path.to_str().unwrap(), "--kind", "page"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("total pages is 7, expected 8"));
}

#[test]
fn inspect_mismatched_page_passes_when_lenient() {
    let path = fixture("page_mismatch.json");
    let output = envelope(&["inspect", path.to_str().unwrap(), "--kind", "page", "--lenient"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("envelope inspect"));
    assert!(stdout.contains("total pages is 7, expected 8"));
}

#[test]
fn inspect_mismatched_page_passes_with_lenient_config_file() {
    let config = temp_input("policy = \"lenient\"\n");
    let path = fixture("page_mismatch.json");
    let output = envelope(&[
        "inspect",
        path.to_str().unwrap(),
        "--kind",
        "page",
        "--config",
        path_of(&config),
    ]);
    assert!(output.status.success());
}

#[test]
fn inspect_error_table_is_wrapped_in_layout() {
    let path = fixture("error.json");
    let output = envelope(&["inspect", path.to_str().unwrap(), "--kind", "error"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next().unwrap();
    assert!(first.starts_with("envelope inspect"));
    assert!(stdout.contains("Validation failed"));
    assert!(stdout.trim_end().ends_with("error envelope, status 422"));
}

#[test]
fn inspect_response_as_markdown() {
    let path = fixture("response.json");
    let output = envelope(&["inspect", path.to_str().unwrap(), "--output", "markdown"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("envelope inspect"));
    assert!(stdout.lines().any(|line| line.contains("| Field") && line.contains("Value")));
    assert!(stdout.lines().any(|line| line.contains("|---")));
    assert!(stdout.contains("User loaded"));
}

#[test]
fn inspect_error_as_csv() {
    let path = fixture("error.json");
    let output = envelope(&["inspect", path.to_str().unwrap(), "--kind", "error", "--output", "csv"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("Field,Value"));
    assert_eq!(lines.next(), Some("status,422"));
}

#[test]
fn inspect_far_page_lenient_numbers_items_without_overflow() {
    let page = temp_input(
        r#"{"items": [1, 2], "totalCount": 2, "page": 18446744073709551615, "pageSize": 1, "totalPages": 2}"#,
    );
    let output = envelope(&[
        "inspect",
        path_of(&page),
        "--kind",
        "page",
        "--lenient",
        "--output",
        "csv",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["#,Item", "18446744073709551615,1", "-,2"]);
}

#[test]
fn inspect_require_success_rejects_errors() {
    let path = fixture("response_with_errors.json");
    let output = envelope(&["inspect", path.to_str().unwrap(), "--require-success"]);
    assert!(!output.status.success());
}

// -- reply --

#[test]
fn reply_success_as_json() {
    let path = fixture("response.json");
    let output = envelope(&[
        "reply",
        path.to_str().unwrap(),
        "--status",
        "200",
        "--output",
        "json",
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["status"], 200);
    assert_eq!(json["data"]["name"], "Ada Lovelace");
    assert_eq!(json["message"], "User loaded");
}

#[test]
fn reply_success_table_footer() {
    let path = fixture("response.json");
    let output = envelope(&["reply", path.to_str().unwrap(), "--status", "200"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("envelope reply"));
    assert!(stdout.trim_end().ends_with("success envelope"));
}

#[test]
fn reply_synthesizes_error_for_plain_body() {
    let file = temp_input("Bad Gateway");
    let output = envelope(&["reply", path_of(&file), "--status", "502", "--output", "json"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["status"], 502);
    assert_eq!(json["message"], "Bad Gateway");
}

// -- paginate --

#[test]
fn paginate_array() {
    let file = temp_input("[1, 2, 3, 4, 5, 6, 7]");
    let output = envelope(&[
        "paginate",
        path_of(&file),
        "--page",
        "2",
        "--page-size",
        "3",
        "--output",
        "json",
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["items"], json!([4, 5, 6]));
    assert_eq!(json["totalCount"], 7);
    assert_eq!(json["totalPages"], 3);
    assert!(json.get("next").is_none());
}

#[test]
fn paginate_rejects_zero_page_size() {
    let file = temp_input("[1, 2]");
    let output = envelope(&["paginate", path_of(&file), "--page-size", "0"]);
    assert!(!output.status.success());
}

#[test]
fn paginate_as_csv() {
    let file = temp_input("[1, 2, 3, 4, 5]");
    let output = envelope(&[
        "paginate",
        path_of(&file),
        "--page",
        "2",
        "--page-size",
        "2",
        "--output",
        "csv",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["#,Item", "3,3", "4,4"]);
}

#[test]
fn paginate_as_markdown_in_layout() {
    let file = temp_input("[1, 2, 3]");
    let output = envelope(&["paginate", path_of(&file), "--page-size", "2", "--output", "md"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("envelope paginate"));
    assert!(stdout.lines().any(|line| line.contains("| Page") && line.contains("Total Pages")));
    assert!(stdout.lines().any(|line| line.contains("|---")));
    assert!(stdout.trim_end().ends_with("page 1 of 2 (3 total)"));
}

#[test]
fn paginate_uses_zero_base_from_config_file() {
    let config = temp_input("page_base = \"zero\"\n");
    let file = temp_input("[1, 2, 3, 4, 5]");
    let output = envelope(&[
        "paginate",
        path_of(&file),
        "--page-size",
        "2",
        "--config",
        path_of(&config),
        "--output",
        "json",
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["page"], 0);
    assert_eq!(json["items"], json!([1, 2]));
    assert_eq!(json["totalPages"], 3);
}

#[test]
fn paginate_reads_config_from_environment() {
    let config = temp_input("page_base = \"zero\"\n");
    let file = temp_input("[1, 2, 3]");
    let output = command(&["paginate", path_of(&file), "--page", "1", "--page-size", "2", "--output", "json"])
        .env("ENVELOPE_CONFIG", config.path())
        .output()
        .expect("binary runs");
    assert!(output.status.success());
    let json = stdout_json(&output);
    // page 1 is the second page when counting from zero
    assert_eq!(json["items"], json!([3]));
}

#[test]
fn config_flag_takes_precedence_over_environment() {
    let config = temp_input("page_base = \"one\"\n");
    let file = temp_input("[1, 2, 3]");
    let output = command(&[
        "paginate",
        path_of(&file),
        "--page-size",
        "2",
        "--config",
        path_of(&config),
        "--output",
        "json",
    ])
    .env("ENVELOPE_CONFIG", "/nonexistent/contract.toml")
    .output()
    .expect("binary runs");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["page"], 1);
}

#[test]
fn paginate_rejects_page_zero_with_default_one_base() {
    let file = temp_input("[1, 2, 3]");
    let output = envelope(&["paginate", path_of(&file), "--page", "0"]);
    assert!(!output.status.success());
}

#[test]
fn paginate_enforces_max_page_size_from_config() {
    let config = temp_input("max_page_size = 2\n");
    let file = temp_input("[1, 2, 3]");
    let output = envelope(&[
        "paginate",
        path_of(&file),
        "--page-size",
        "3",
        "--config",
        path_of(&config),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("between 1 and 2"));
}

#[test]
fn paginate_fails_on_unreadable_config() {
    let config = temp_input("page_bse = \"zero\"\n");
    let file = temp_input("[1]");
    let output = envelope(&["paginate", path_of(&file), "--config", path_of(&config)]);
    assert!(!output.status.success());
}

#[test]
fn paginate_sorted_with_next_link() {
    let file = temp_input(r#"[{"id": 3}, {"id": 1}, {"id": 2}]"#);
    let output = envelope(&[
        "paginate",
        path_of(&file),
        "--page-size",
        "2",
        "--sort-by",
        "id",
        "--link",
        "https://api.example.com/items",
        "--output",
        "json",
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["items"], json!([{"id": 1}, {"id": 2}]));
    assert_eq!(json["totalCount"], 3);
    assert_eq!(
        json["next"],
        "https://api.example.com/items?page=2&pageSize=2&sortBy=id"
    );
}

#[test]
fn paginate_descending_link_has_prefixed_sort_key() {
    let file = temp_input(r#"[{"id": 3}, {"id": 1}, {"id": 2}]"#);
    let output = envelope(&[
        "paginate",
        path_of(&file),
        "--page-size",
        "2",
        "--sort-by",
        "id",
        "--order",
        "desc",
        "--link",
        "https://api.example.com/items",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_end().ends_with(
        "page 1 of 2 (3 total) | next: https://api.example.com/items?page=2&pageSize=2&sortBy=-id"
    ));
}

#[test]
fn paginate_last_page_has_no_next_link() {
    let file = temp_input("[1, 2, 3]");
    let output = envelope(&[
        "paginate",
        path_of(&file),
        "--page",
        "2",
        "--page-size",
        "2",
        "--link",
        "https://api.example.com/items",
        "--output",
        "json",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["next"], Value::Null);
}

#[test]
fn paginate_rejects_invalid_link() {
    let file = temp_input("[1, 2, 3]");
    let output = envelope(&["paginate", path_of(&file), "--page-size", "1", "--link", "not a url"]);
    assert!(!output.status.success());
}
