//! End-to-end tests for `stencil hash-files`

use assert_cmd::Command;
use camino::Utf8PathBuf;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = ".devcontainer/devcontainer.json";
const PREFIX: &str =
    "  // Devcontainer context hash (do not manually edit this, it's managed by a pre-commit hook): ";

fn git(root: &Utf8PathBuf, args: &[&str]) {
    let status = std::process::Command::new("git")
        .arg("-C")
        .arg(root.as_std_path())
        .args(args)
        .status()
        .unwrap();
    assert!(status.success());
}

fn repo() -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    git(&root, &["init", "--quiet"]);
    fs::create_dir_all(root.join(".devcontainer")).unwrap();
    fs::write(root.join(CONFIG), "{\n  \"name\": \"dev\"\n}\n").unwrap();
    fs::write(root.join(".devcontainer/Dockerfile"), "FROM python:3.12\n").unwrap();
    fs::write(root.join("uv.lock"), "version = 1\n").unwrap();
    fs::write(root.join("README.md"), "# demo\n").unwrap();
    git(&root, &["add", "--all"]);
    (temp, root)
}

fn stencil(cwd: &Utf8PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_report_prints_eight_hex_digits() {
    let (_temp, root) = repo();
    stencil(&root)
        .args(["hash-files", root.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{8}\n$").unwrap());
}

#[test]
fn test_report_is_stable_across_runs() {
    let (_temp, root) = repo();
    let first = stencil(&root)
        .args(["hash-files", "."])
        .output()
        .unwrap()
        .stdout;
    let second = stencil(&root)
        .args(["hash-files", root.as_str()])
        .output()
        .unwrap()
        .stdout;
    assert_eq!(first, second);
}

#[test]
fn test_debug_lists_tracked_files_first() {
    let (_temp, root) = repo();
    stencil(&root)
        .args(["hash-files", ".", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Tracked files discovered:\n"))
        .stdout(predicate::str::contains("README.md\n"));
}

#[test]
fn test_debug_in_update_mode_lists_filtered_subset() {
    let (_temp, root) = repo();
    stencil(&root)
        .args([
            "hash-files",
            ".",
            "--debug",
            "--for-devcontainer-config-update",
            "--exit-zero",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("uv.lock\n"))
        .stdout(predicate::str::contains("README.md").not());
}

#[test]
fn test_update_exits_one_then_zero() {
    let (_temp, root) = repo();

    stencil(&root)
        .args(["hash-files", ".", "--for-devcontainer-config-update"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "Updated .devcontainer/devcontainer.json with the new hash: ",
        ));
    let annotated = fs::read_to_string(root.join(CONFIG)).unwrap();
    assert!(annotated.contains(PREFIX));

    stencil(&root)
        .args(["hash-files", ".", "--for-devcontainer-config-update"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(fs::read_to_string(root.join(CONFIG)).unwrap(), annotated);
}

#[test]
fn test_stale_hash_with_and_without_exit_zero() {
    let (_temp, root) = repo();
    let stale = format!("{{\n  \"name\": \"dev\"\n{PREFIX}deadbeef # spellchecker:disable-line\n}}\n");

    fs::write(root.join(CONFIG), &stale).unwrap();
    stencil(&root)
        .args(["hash-files", ".", "--for-devcontainer-config-update"])
        .assert()
        .code(1);
    let without_flag = fs::read_to_string(root.join(CONFIG)).unwrap();
    assert!(!without_flag.contains("deadbeef"));

    fs::write(root.join(CONFIG), &stale).unwrap();
    stencil(&root)
        .args([
            "hash-files",
            ".",
            "--for-devcontainer-config-update",
            "--exit-zero",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("with the new hash:"));
    assert_eq!(fs::read_to_string(root.join(CONFIG)).unwrap(), without_flag);
}

#[test]
fn test_config_resolved_against_folder_not_cwd() {
    let (_temp, root) = repo();
    let elsewhere = TempDir::new().unwrap();
    let elsewhere = Utf8PathBuf::from_path_buf(elsewhere.path().to_path_buf()).unwrap();

    stencil(&elsewhere)
        .args([
            "hash-files",
            root.as_str(),
            "--for-devcontainer-config-update",
            "--exit-zero",
        ])
        .assert()
        .success();
    assert!(fs::read_to_string(root.join(CONFIG))
        .unwrap()
        .contains(PREFIX));
}

#[test]
fn test_invalid_directory() {
    let (_temp, root) = repo();
    stencil(&root)
        .args(["hash-files", "does-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a valid directory"));
}

#[test]
fn test_missing_config_file_is_fatal() {
    let (_temp, root) = repo();
    git(&root, &["rm", "--cached", "--quiet", CONFIG]);
    let before = fs::read_to_string(root.join(CONFIG)).unwrap();

    stencil(&root)
        .args(["hash-files", ".", "--for-devcontainer-config-update"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No devcontainer.json file found in the tracked files",
        ));
    assert_eq!(fs::read_to_string(root.join(CONFIG)).unwrap(), before);
}

#[test]
fn test_project_config_changes_filename() {
    let (_temp, root) = repo();
    fs::write(root.join(".devcontainer/devcontainer.jsonc"), "{\n}\n").unwrap();
    git(&root, &["add", "--all"]);
    git(&root, &["rm", "--cached", "--quiet", CONFIG]);
    fs::write(
        root.join("stencil.yaml"),
        "hash:\n  config-dir: \".devcontainer/\"\n  config-filename: \"devcontainer.jsonc\"\n  context-suffixes: [\".lock\"]\n  context-exact-paths: []\n",
    )
    .unwrap();

    stencil(&root)
        .args(["hash-files", ".", "--for-devcontainer-config-update"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Updated .devcontainer/devcontainer.jsonc",
        ));
}

#[test]
fn test_project_config_found_from_folder_when_run_elsewhere() {
    let (_temp, root) = repo();
    fs::write(root.join(".devcontainer/devcontainer.jsonc"), "{\n}\n").unwrap();
    fs::write(
        root.join("stencil.yaml"),
        "hash:\n  config-filename: \"devcontainer.jsonc\"\n",
    )
    .unwrap();
    git(&root, &["add", "--all"]);
    git(&root, &["rm", "--cached", "--quiet", CONFIG]);

    let elsewhere = TempDir::new().unwrap();
    let elsewhere = Utf8PathBuf::from_path_buf(elsewhere.path().to_path_buf()).unwrap();

    stencil(&elsewhere)
        .args(["hash-files", root.as_str(), "--for-devcontainer-config-update"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Updated .devcontainer/devcontainer.jsonc with the new hash:",
        ));
    stencil(&elsewhere)
        .args(["hash-files", root.as_str(), "--for-devcontainer-config-update"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    stencil(&root)
        .args(["hash-files", ".", "--for-devcontainer-config-update"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
