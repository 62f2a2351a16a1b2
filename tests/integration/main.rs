//! Integration tests for kustomize-graph
//!
//! These tests run the compiled binary against overlay trees on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn create_tree(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in structure {
        let full_path = temp_dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }
    temp_dir
}

fn layered_tree() -> TempDir {
    create_tree(&[
        ("app/kustomization.yaml", "bases:\n- same\n- ./middle\n"),
        ("app/same/kustomization.yaml", ""),
        ("app/middle/kustomization.yaml", "bases:\n- ../base\n"),
        ("app/base/kustomization.yaml", "resources:\n- a.yaml\n"),
        ("app/base/a.yaml", ""),
        ("app/base/excluded.yaml", ""),
    ])
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kustomize-graph"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute kustomize-graph")
}

/// Test that the CLI describes itself
#[test]
fn test_cli_help() {
    let output = run(Path::new("."), &["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Graph how a tree of kustomize overlays builds on its bases"));
}

/// Running without flags graphs the current directory
#[test]
fn test_graph_from_working_directory() {
    let temp_dir = layered_tree();
    let output = run(&temp_dir.path().join("app"), &[]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.starts_with("digraph main {"));
    assert!(stdout.trim_end().ends_with('}'));
    let edges: Vec<&str> = stdout.lines().filter(|l| l.contains(" -> ")).collect();
    assert_eq!(edges.len(), 3);
    assert!(edges[0].contains("/app\" -> \"") && edges[0].ends_with("/app/same\";"));
    assert!(edges[1].ends_with("/app/middle\";"));
    assert!(edges[2].contains("/app/middle\" -> \"") && edges[2].ends_with("/app/base\";"));

    let base_line = stdout
        .lines()
        .find(|l| l.contains("/app/base\" [label="))
        .expect("base node should carry a label");
    assert!(base_line.ends_with("\\n\\nmissing:\\nexcluded.yaml\"];"));
}

/// The --root flag and JSON output
#[test]
fn test_json_output_with_root_flag() {
    let temp_dir = layered_tree();
    let root = temp_dir.path().join("app/middle");
    let root_arg = root.to_string_lossy().into_owned();
    let output = run(
        temp_dir.path(),
        &["--root", &root_arg, "--format", "json", "--graph-name", "mid"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"name\": \"mid\""));
    assert!(stdout.contains("\"directed\": true"));
    assert!(stdout.contains("\"excluded.yaml\""));
}

/// An ambiguous manifest fails the whole run and prints nothing to stdout
#[test]
fn test_ambiguous_manifest_exits_non_zero() {
    let temp_dir = layered_tree();
    fs::write(temp_dir.path().join("app/middle/kustomization.yml"), "").unwrap();

    let output = run(&temp_dir.path().join("app"), &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not produce graph from directory"));
    assert!(stderr.contains("found more than one kustomization file"));
}

/// A directory without a manifest is an error
#[test]
fn test_missing_manifest_exits_non_zero() {
    let temp_dir = create_tree(&[("deployment.yaml", "kind: Deployment\n")]);
    let output = run(temp_dir.path(), &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no kustomization file found"));
}

/// Cycles are cut by default and rejected with --fail-on-cycle
#[test]
fn test_cycle_handling() {
    let temp_dir = create_tree(&[
        ("a/kustomization.yaml", "bases:\n- ../b\n"),
        ("b/kustomization.yaml", "bases:\n- ../a\n"),
    ]);
    let dir = temp_dir.path().join("a");

    let cut = run(&dir, &[]);
    assert!(cut.status.success());
    let stdout = String::from_utf8_lossy(&cut.stdout);
    assert_eq!(stdout.lines().filter(|l| l.contains(" -> ")).count(), 2);

    let strict = run(&dir, &["--fail-on-cycle"]);
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("base references form a cycle"));
}

/// --max-visits bounds the walk
#[test]
fn test_visit_budget_flag() {
    let temp_dir = layered_tree();
    let dir = temp_dir.path().join("app");

    let output = run(&dir, &["--max-visits", "2"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("visited more than 2 directories"));

    assert!(run(&dir, &["--max-visits", "4"]).status.success());
}
