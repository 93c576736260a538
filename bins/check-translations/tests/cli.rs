use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn resources(keys: &[&str]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n");
    for key in keys {
        xml.push_str(&format!("    <string name=\"{}\">{}</string>\n", key, key));
    }
    xml.push_str("</resources>\n");
    xml
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// An Android project with a default-language baseline
fn project(baseline: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "res/values/strings.xml", &resources(baseline));
    dir
}

fn check(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("check-translations").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn reports_each_candidate_in_order() {
    let dir = project(&["app_name", "ok", "cancel"]);
    write(dir.path(), "res/values-it/strings.xml", &resources(&["app_name", "ok"]));
    write(dir.path(), "res/values-de/strings.xml", &resources(&["app_name", "ok", "cancel", "legacy_key"]));

    check(&dir)
        .args(["res/values-it/strings.xml", "res/values-de/strings.xml"])
        .assert()
        .success()
        .stdout(
            "Report for res/values-it/strings.xml:\n\
             Missing translations:\n   cancel\n\
             Superfluous translations:\n\
             Report for res/values-de/strings.xml:\n\
             Missing translations:\n\
             Superfluous translations:\n   legacy_key\n",
        );
}

#[test]
fn no_candidates_prints_nothing() {
    let dir = project(&["ok"]);
    check(&dir).assert().success().stdout("");
}

#[test]
fn missing_baseline_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "res/values-it/strings.xml", &resources(&["ok"]));

    check(&dir)
        .arg("res/values-it/strings.xml")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("E2001"));
}

#[test]
fn unparsable_baseline_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "res/values/strings.xml", "<resources><string name=\"ok\">");

    check(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E4001"));
}

#[test]
fn bad_candidate_aborts_after_earlier_reports() {
    let dir = project(&["ok"]);
    write(dir.path(), "res/values-it/strings.xml", &resources(&["ok"]));
    write(dir.path(), "res/values-de/strings.xml", "not xml");
    write(dir.path(), "res/values-fr/strings.xml", &resources(&["ok"]));

    check(&dir)
        .args([
            "res/values-it/strings.xml",
            "res/values-de/strings.xml",
            "res/values-fr/strings.xml",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Report for res/values-it/strings.xml:"))
        .stdout(predicate::str::contains("values-fr").not())
        .stderr(predicate::str::contains("values-de"));
}

#[test]
fn keep_going_reports_remaining_candidates() {
    let dir = project(&["ok"]);
    write(dir.path(), "res/values-it/strings.xml", &resources(&["ok"]));
    write(dir.path(), "res/values-fr/strings.xml", &resources(&[]));

    check(&dir)
        .args([
            "--keep-going",
            "res/values-it/strings.xml",
            "res/values-de/strings.xml",
            "res/values-fr/strings.xml",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Report for res/values-it/strings.xml:"))
        .stdout(predicate::str::contains(
            "Report for res/values-fr/strings.xml:\nMissing translations:\n   ok\n",
        ))
        .stderr(predicate::str::contains("Skipping res/values-de/strings.xml"));
}

#[test]
fn fail_on_diff_sets_validation_status() {
    let dir = project(&["ok", "cancel"]);
    write(dir.path(), "res/values-it/strings.xml", &resources(&["ok"]));
    write(dir.path(), "res/values-de/strings.xml", &resources(&["ok", "cancel"]));

    check(&dir)
        .args(["--fail-on-diff", "res/values-it/strings.xml"])
        .assert()
        .code(2);

    check(&dir)
        .args(["--fail-on-diff", "res/values-de/strings.xml"])
        .assert()
        .success();
}

#[test]
fn discover_appends_values_directories() {
    let dir = project(&["ok"]);
    write(dir.path(), "res/values-it/strings.xml", &resources(&["ok"]));
    write(dir.path(), "res/values-de/strings.xml", &resources(&["ok", "extra"]));

    let assert = check(&dir).arg("--discover").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let de = stdout.find("values-de").unwrap();
    let it = stdout.find("values-it").unwrap();
    assert!(de < it);
    assert_eq!(stdout.matches("Report for").count(), 2);
    assert!(stdout.contains("   extra\n"));
}

#[test]
fn strict_rejects_unnamed_strings() {
    let dir = project(&["ok"]);
    write(
        dir.path(),
        "res/values-it/strings.xml",
        "<resources><string>orphan</string></resources>",
    );

    check(&dir)
        .arg("res/values-it/strings.xml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Superfluous translations:\n   \n"));

    check(&dir)
        .args(["--strict", "res/values-it/strings.xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E4002"));
}

#[test]
fn baseline_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "app/res/values/strings.xml", &resources(&["a", "b"]));
    write(dir.path(), "app/res/values-it/strings.xml", &resources(&["a"]));
    write(
        dir.path(),
        ".droidtools.toml",
        "[translations]\nbaseline = \"app/res/values/strings.xml\"\n",
    );

    check(&dir)
        .arg("app/res/values-it/strings.xml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing translations:\n   b\n"));
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let dir = project(&["ok"]);
    check(&dir)
        .args(["--config", "nope.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("E3001"));
}

#[test]
fn json_output() {
    let dir = project(&["a", "b", "c"]);
    write(dir.path(), "res/values-it/strings.xml", &resources(&["b", "c", "d"]));

    let assert = check(&dir)
        .args(["--format", "json", "res/values-it/strings.xml"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["baseline"], "res/values/strings.xml");
    assert_eq!(json["baseline_keys"], 3);
    assert_eq!(json["reports"][0]["candidate"], "res/values-it/strings.xml");
    assert_eq!(json["reports"][0]["missing"], serde_json::json!(["a"]));
    assert_eq!(json["reports"][0]["superfluous"], serde_json::json!(["d"]));
    assert_eq!(json["failures"], serde_json::json!([]));
}

#[test]
fn json_lists_failures_when_keeping_going() {
    let dir = project(&["ok"]);
    write(dir.path(), "res/values-it/strings.xml", &resources(&["ok"]));

    let assert = check(&dir)
        .args([
            "--format",
            "json",
            "--keep-going",
            "res/values-fr/strings.xml",
            "res/values-it/strings.xml",
        ])
        .assert()
        .code(1);

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["reports"][0]["candidate"], "res/values-it/strings.xml");
    assert_eq!(json["failures"][0]["candidate"], "res/values-fr/strings.xml");
    assert_eq!(json["failures"][0]["error"]["code_str"], "E2001");
    assert_eq!(json["failures"].as_array().map(Vec::len), Some(1));
}
