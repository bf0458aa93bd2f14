use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_vpsdb-check")
}

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the binary from an empty directory so no stray config file is picked up.
fn run_in(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .current_dir(dir.path())
        .env_remove("VPSDB_PATH")
        .env("VPSDB_LOG", "warn")
        .output()
        .expect("binary should run")
}

fn copy_sample(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("vpsdb.json");
    fs::copy(fixture_path("sample_catalog.json"), &path).expect("copy fixture");
    path
}

#[test]
fn check_prints_findings_and_summary() {
    let dir = tempdir().expect("tempdir");
    let db = copy_sample(&dir);
    let before = fs::read_to_string(&db).expect("read");

    let output = run_in(&dir, &["check", "--db", db.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 12);
    assert!(stdout.contains(
        "[error] orphaned-pup-packs: The Addams Family (g-taf) / pup-pack #0: no id"
    ));
    assert!(stdout.contains("contributed by Bob"));
    assert_eq!(
        stdout.lines().last(),
        Some("11 finding(s): 1 error(s), 7 warning(s), 3 info")
    );
    assert_eq!(fs::read_to_string(&db).expect("read"), before);
}

#[test]
fn check_reads_database_path_from_environment() {
    let dir = tempdir().expect("tempdir");
    let db = copy_sample(&dir);

    let output = Command::new(bin())
        .args(["check", "--rule", "orphaned-pup-packs"])
        .current_dir(dir.path())
        .env("VPSDB_PATH", &db)
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().last(),
        Some("1 finding(s): 1 error(s), 0 warning(s), 0 info")
    );
}

#[test]
fn config_file_selects_rules_and_database() {
    let dir = tempdir().expect("tempdir");
    copy_sample(&dir);
    fs::write(
        dir.path().join("vpsdb-check.yaml"),
        "database: vpsdb.json\nrules: [missing-year, missing-theme]\n",
    )
    .expect("write config");

    let output = run_in(&dir, &["check"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[warning] missing-year: Xenon (g-xen): year missing"));
    assert_eq!(
        stdout.lines().last(),
        Some("2 finding(s): 0 error(s), 2 warning(s), 0 info")
    );
}

#[test]
fn fix_saves_cleaned_catalog() {
    let dir = tempdir().expect("tempdir");
    let db = copy_sample(&dir);

    let output = run_in(&dir, &["fix", "--db", db.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("removed redundant feature tag 'incl. B2S'"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&db).expect("read")).expect("json");
    assert_eq!(saved[0]["tableFiles"][0]["features"], serde_json::json!(["MOD"]));
    assert_eq!(saved[1]["tableFiles"][0]["comment"], "Reskin of the original");
    assert!(!dir.path().join("vpsdb.json.tmp").exists());
}

#[test]
fn fix_runs_cleanup_before_selected_rules() {
    let dir = tempdir().expect("tempdir");
    let db = copy_sample(&dir);

    let db = db.to_str().expect("utf-8 path");
    let output = run_in(&dir, &["fix", "--db", db, "--rule", "orphaned-pup-packs"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("[info] redundant-feature-tags:"));
    assert_eq!(
        lines.last().copied(),
        Some("3 finding(s): 1 error(s), 0 warning(s), 2 info")
    );
}

#[test]
fn failed_save_is_reported_and_leaves_database_untouched() {
    let dir = tempdir().expect("tempdir");
    let db = copy_sample(&dir);
    let before = fs::read(&db).expect("read");
    fs::create_dir(dir.path().join("vpsdb.json.tmp")).expect("block temp path");

    let output = run_in(&dir, &["fix", "--db", db.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("save failed"));
    assert_eq!(fs::read(&db).expect("read"), before);
}

#[test]
fn missing_database_exits_with_failure() {
    let dir = tempdir().expect("tempdir");
    let output = run_in(&dir, &["check", "--db", "nowhere.json"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("load failed"));
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_field_exits_with_failure_and_names_the_path() {
    let dir = tempdir().expect("tempdir");
    let db = dir.path().join("vpsdb.json");
    fs::write(
        &db,
        r#"[{"id":"g1","updatedAt":1,"manufacturer":"Bally","name":"Xenon","lastCreatedAt":1,"rating":5}]"#,
    )
    .expect("write db");

    let output = run_in(&dir, &["check", "--db", db.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Game at $[0]: unknown field `rating`"));
}

#[test]
fn usage_errors_exit_with_two() {
    let dir = tempdir().expect("tempdir");

    let output = run_in(&dir, &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: vpsdb-check"));

    let output = run_in(&dir, &["check", "--rule", "no-such-rule"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown rule 'no-such-rule'"));
}

#[test]
fn rules_command_lists_every_rule() {
    let dir = tempdir().expect("tempdir");
    let output = run_in(&dir, &["rules"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 10);
    assert!(stdout.starts_with("missing-table-version"));
    assert!(stdout.contains("orphaned-pup-packs"));
}
