//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn unitdrill() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("unitdrill").unwrap()
}

/// A practice command isolated from any user or working-directory config.
fn practice(home: &TempDir) -> Command {
    let mut cmd = unitdrill();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("UNITDRILL_SCORE_URL")
        .env_remove("UNITDRILL_SCORE_TOKEN")
        .arg("practice");
    cmd
}

#[test]
fn validate_catalog_file() {
    unitdrill()
        .arg("validate")
        .arg("--catalog")
        .arg("../../catalogs/time.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Group: Time (6 units)"))
        .stdout(predicate::str::contains("All catalogs valid"));
}

#[test]
fn validate_directory() {
    unitdrill()
        .arg("validate")
        .arg("--catalog")
        .arg("../../catalogs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imperial Volume"))
        .stdout(predicate::str::contains("Imperial Weight"))
        .stdout(predicate::str::contains("Time"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[[groups]]
name = "Broken"

[[groups.units]]
name = "a"
to_base = 2

[[groups.units]]
name = "b"
to_base = -3
"#,
    )
    .unwrap();

    unitdrill()
        .arg("validate")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Broken] WARNING: no base unit"))
        .stdout(predicate::str::contains("non-positive multiplier"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    unitdrill()
        .arg("validate")
        .arg("--catalog")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn units_lists_builtin_groups() {
    unitdrill()
        .arg("units")
        .assert()
        .success()
        .stdout(predicate::str::contains("Metric Length"))
        .stdout(predicate::str::contains("English Volume"))
        .stdout(predicate::str::contains("fl oz"))
        .stdout(predicate::str::contains("63360"));
}

#[test]
fn units_with_custom_catalog() {
    unitdrill()
        .arg("units")
        .arg("--catalog")
        .arg("../../catalogs/time.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("s (base)"))
        .stdout(predicate::str::contains("86400"))
        .stdout(predicate::str::contains("Metric Length").not());
}

#[test]
fn generate_json() {
    let output = unitdrill()
        .args(["generate", "--count", "3", "--seed", "42", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let questions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 3);
    for q in questions {
        let options = q["options"].as_array().unwrap();
        assert_eq!(options.len(), 4);
        let answer = q["problem"]["answer"].as_f64().unwrap();
        assert!(options.iter().any(|o| o.as_f64() == Some(answer)));
    }
}

#[test]
fn generate_is_reproducible_with_seed() {
    let run = || {
        unitdrill()
            .args(["generate", "--count", "4", "--seed", "7"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn generate_rejects_unknown_format() {
    unitdrill()
        .args(["generate", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn example_for_given_question() {
    unitdrill()
        .args(["example", "--question", "Convert 3 ft to in"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem: Convert 3 ft to in (English Length)"))
        .stdout(predicate::str::contains("Answer: 36"));
}

#[test]
fn example_random() {
    unitdrill()
        .args(["example", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem: Convert"))
        .stdout(predicate::str::contains("Method: Convert"));
}

#[test]
fn practice_clamps_short_duration() {
    let home = TempDir::new().unwrap();
    practice(&home)
        .args(["--duration", "5", "--seed", "7"])
        .write_stdin("1\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Practice session: 10s"))
        .stdout(predicate::str::contains("Final score"))
        .stdout(predicate::str::contains("1 correct").or(predicate::str::contains("1 incorrect")));
}

#[test]
fn practice_invalid_duration_defaults_to_sixty() {
    let home = TempDir::new().unwrap();
    practice(&home)
        .args(["--duration", "soon"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Practice session: 60s"))
        .stdout(predicate::str::contains("No problems answered"));
}

#[test]
fn practice_ends_on_eof() {
    let home = TempDir::new().unwrap();
    practice(&home)
        .args(["--seed", "11"])
        .write_stdin("2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Final score"))
        .stdout(predicate::str::contains("Correct"));
}

#[test]
fn practice_example_does_not_answer() {
    let home = TempDir::new().unwrap();
    practice(&home)
        .args(["--seed", "5"])
        .write_stdin("e\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution: Method: Convert"))
        .stdout(predicate::str::contains("Final score: 0 (0 correct, 0 incorrect"));
}

#[test]
fn practice_rejects_garbage_input() {
    let home = TempDir::new().unwrap();
    practice(&home)
        .write_stdin("banana\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter an option number"));
}

#[test]
fn practice_writes_reports() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("results");

    practice(&home)
        .args(["--seed", "1", "--name", "Ada", "--format", "all", "--output"])
        .arg(&out)
        .write_stdin("1\n2\nq\n")
        .assert()
        .success();

    let mut names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2);
    assert!(names[0].starts_with("session-") && names[0].ends_with(".html"));
    assert!(names[1].ends_with(".json"));

    let json = std::fs::read_to_string(out.join(&names[1])).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["player"], "Ada");
    assert_eq!(report["summary"]["solved"].as_array().unwrap().len(), 2);
}

#[test]
fn practice_rejects_unknown_report_format() {
    let home = TempDir::new().unwrap();
    practice(&home)
        .args(["--format", "sarif"])
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown report format"));
}

#[test]
fn practice_survives_unreachable_score_service() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    std::fs::write(
        &config,
        r#"
player = "Grace"
feedback_delay_ms = 0

[reporter]
type = "webhook"
url = "http://127.0.0.1:1/scores"
timeout_secs = 2
"#,
    )
    .unwrap();

    practice(&home)
        .arg("--config")
        .arg(&config)
        .write_stdin("1\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Final score"));
}

#[test]
fn practice_uses_catalog_from_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("unitdrill.toml"),
        format!(
            "catalog = \"{}\"\n",
            std::fs::canonicalize("../../catalogs/time.toml")
                .unwrap()
                .display()
        ),
    )
    .unwrap();

    practice(&home)
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(Time)"));
}

#[test]
fn practice_missing_config_fails() {
    let home = TempDir::new().unwrap();
    practice(&home)
        .args(["--config", "nope.toml"])
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    unitdrill()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created unitdrill.toml"))
        .stdout(predicate::str::contains("Created catalogs/example.toml"));

    assert!(dir.path().join("unitdrill.toml").exists());
    assert!(dir.path().join("catalogs/example.toml").exists());

    unitdrill()
        .arg("validate")
        .arg("--catalog")
        .arg(dir.path().join("catalogs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All catalogs valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    unitdrill()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    unitdrill()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    unitdrill()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timed unit-conversion quiz"));
}

#[test]
fn version_output() {
    unitdrill()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unitdrill"));
}
