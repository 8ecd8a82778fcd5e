//! CLI integration tests
//!
//! Run the `specmatch` binary against documents written to a temp dir and
//! check stdout and exit status.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const DESIRED: &str = r#"{
  "metadata": {"name": "web", "labels": {"app": "web"}},
  "spec": {
    "replicas": 3,
    "template": {"spec": {"containers": [{"name": "app", "image": "app:1.4"}]}}
  }
}"#;

const LIVE_YAML: &str = "\
metadata:
  name: web
  labels:
    app: web
  resourceVersion: \"8812\"
spec:
  replicas: 3
  template:
    spec:
      containers:
        - name: app
          image: app:1.5
status:
  readyReplicas: 3
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_specmatch"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_compare_equal_over_replicas() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "desired.json", DESIRED);
    let b = write(&dir, "live.yaml", LIVE_YAML);

    let output = run(&[
        "compare",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-p",
        "^spec\\.replicas$",
    ]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output).trim(), "equal");
}

#[test]
fn test_compare_image_change_exits_one_with_report() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "desired.json", DESIRED);
    let b = write(&dir, "live.yaml", LIVE_YAML);

    let output = run(&[
        "compare",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "--scope",
        "workload_images",
        "--report",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("**Result**: Different"));
    assert!(text.contains("spec.template.spec.containers.0.image"));
    assert!(text.contains("\"app:1.5\""));
}

#[test]
fn test_compare_redacted_report_hides_values() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", r#"{"type": "Opaque", "data": {"token": "c2VjcmV0"}}"#);
    let b = write(&dir, "b.json", r#"{"type": "Opaque", "data": {"token": "b3RoZXI="}}"#);

    let output = run(&[
        "compare",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "--scope",
        "secret",
        "--report",
        "--redact",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("***REDACTED***"));
    assert!(!text.contains("c2VjcmV0"));
}

#[test]
fn test_invalid_pattern_exits_two() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", "{}");

    let output = run(&[
        "compare",
        a.to_str().unwrap(),
        a.to_str().unwrap(),
        "-p",
        "^spec.(",
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_PATTERN"));
}

#[test]
fn test_unknown_scope_exits_two() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", "{}");

    let output = run(&[
        "compare",
        a.to_str().unwrap(),
        a.to_str().unwrap(),
        "--scope",
        "pods",
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_UNKNOWN_SCOPE"));
}

#[test]
fn test_flatten_then_compare_snapshots() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "desired.json", DESIRED);

    let output = run(&["flatten", doc.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("\"metadata.labels.app\""));
    assert!(text.contains("\"kind\": \"uint64\""));

    let snap = write(&dir, "desired.snapshot.json", &text);
    let output = run(&[
        "compare",
        snap.to_str().unwrap(),
        snap.to_str().unwrap(),
        "--snapshot",
        "-p",
        ".",
    ]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_config_scope_and_unordered_rule() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "specmatch.toml",
        r#"
[scopes]
ports = ["^spec\\.ports\\."]

[[unordered]]
path = "^spec\\.ports$"
key = "name"
"#,
    );
    let a = write(
        &dir,
        "a.json",
        r#"{"spec": {"ports": [{"name": "http", "port": 80}, {"name": "https", "port": 443}]}}"#,
    );
    let b = write(
        &dir,
        "b.json",
        r#"{"spec": {"ports": [{"name": "https", "port": 443}, {"name": "http", "port": 80}]}}"#,
    );

    let with_config = run(&[
        "--config",
        config.to_str().unwrap(),
        "compare",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "--scope",
        "ports",
    ]);
    assert_eq!(
        with_config.status.code(),
        Some(0),
        "Stderr: {}",
        String::from_utf8_lossy(&with_config.stderr)
    );

    let without = run(&[
        "compare",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-p",
        "^spec\\.ports\\.",
    ]);
    assert_eq!(without.status.code(), Some(1));
}

#[test]
fn test_fmt_compact() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "doc.yaml", "b: 2\na: [1, 2]\n");

    let output = run(&["fmt", doc.to_str().unwrap(), "--compact"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), r#"{"a":[1,2],"b":2}"#);
}
