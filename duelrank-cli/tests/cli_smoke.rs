use std::process::Command;

use tempfile::tempdir;

fn duelrank() -> Command {
    Command::new(env!("CARGO_BIN_EXE_duelrank"))
}

#[test]
fn rank_with_scripted_answers_writes_json() {
    let dir = tempdir().unwrap();
    let items = dir.path().join("items.txt");
    let answers = dir.path().join("answers.txt");
    let out = dir.path().join("ranking.json");
    std::fs::write(&items, "A\nB\nC\nD\n").unwrap();
    // B beats A; C loses to B, beats A; D loses to C and to A.
    std::fs::write(&answers, "k\nj\nk\nj\nj\n").unwrap();

    let status = duelrank()
        .arg("rank")
        .arg("--items")
        .arg(&items)
        .arg("--answers")
        .arg(&answers)
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("--json")
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let raw = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let names: Vec<&str> = value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["B", "C", "A", "D"]);
    assert_eq!(value["comparisons"], 5);
    assert_eq!(value["max_comparisons"], 5);
}

#[test]
fn rank_with_custom_keys_prints_table() {
    let dir = tempdir().unwrap();
    let answers = dir.path().join("answers.txt");
    std::fs::write(&answers, "right\n").unwrap();

    let output = duelrank()
        .args(["rank", "--item", "tea", "--item", "coffee", "--left-key", "a", "--right-key", "d"])
        .arg("--answers")
        .arg(&answers)
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("1 | coffee"));
    assert!(stdout.contains("2 | tea"));
}

#[test]
fn rank_fails_when_answers_run_out() {
    let dir = tempdir().unwrap();
    let answers = dir.path().join("answers.txt");
    std::fs::write(&answers, "j\n").unwrap();

    let output = duelrank()
        .args(["rank", "--item", "a", "--item", "b", "--item", "c"])
        .arg("--answers")
        .arg(&answers)
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("abandoned after placing 2 of 3 items"));
}

#[test]
fn simulate_reports_exact_rankings() {
    let output = duelrank()
        .args(["simulate", "--count", "12", "--runs", "3", "--seed", "42", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 3);
    for report in reports {
        assert_eq!(report["items"], 12);
        assert_eq!(report["exact"], true);
        assert!(report["comparisons"].as_u64().unwrap() <= report["theoretical_max"].as_u64().unwrap());
    }
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("duelrank").join("config.toml");

    let status = duelrank().arg("init").arg("--config").arg(&path).status().unwrap();
    assert!(status.success());
    assert!(path.exists());

    let status = duelrank().arg("init").arg("--config").arg(&path).status().unwrap();
    assert!(!status.success());
}
