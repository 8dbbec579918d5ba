use crate::common::file::{write_file, FileSpec};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with one commit tracking `1.txt` and `2.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("2.txt"),
        "two".to_string(),
    ));

    run_sprig_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    run_sprig_command(repository_dir.path(), &["add", "2.txt"])
        .assert()
        .success();
    run_sprig_command(repository_dir.path(), &["commit", "First commit"])
        .assert()
        .success();

    repository_dir
}

pub fn run_sprig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sprig").expect("Failed to find sprig binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Write a file, stage it, and commit it in one go
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_sprig_command(dir, &["add", name]).assert().success();
    run_sprig_command(dir, &["commit", message])
        .assert()
        .success();
}

/// Get the current HEAD commit id
pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".sprig").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// Get the commit id a branch points to
pub fn read_branch(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(".sprig").join("branches").join(name))
        .expect("Failed to read branch file")
        .trim()
        .to_string()
}

/// Get the name of the current branch
pub fn read_current_branch(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".sprig").join("CURRENT"))
        .expect("Failed to read current branch file")
        .trim()
        .to_string()
}

/// Read a commit's serialized form straight from the store
pub fn read_commit_object(dir: &Path, commit_id: &str) -> String {
    std::fs::read_to_string(dir.join(".sprig").join("commits").join(commit_id))
        .expect("Failed to read commit object")
}

/// Parent ids (first, then merge parent if any) of a stored commit
pub fn read_commit_parents(dir: &Path, commit_id: &str) -> Vec<String> {
    read_commit_object(dir, commit_id)
        .lines()
        .filter_map(|line| {
            line.strip_prefix("parent ")
                .or_else(|| line.strip_prefix("merged "))
                .map(str::to_string)
        })
        .collect()
}

/// Number of stored blobs
pub fn count_blobs(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(".sprig").join("blobs"))
        .expect("Failed to list blobs")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .count()
}
