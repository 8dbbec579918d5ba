use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{
    commit_file, init_repository_dir, read_branch, read_current_branch, read_head,
    run_sprig_command,
};
use common::file::{write_file, FileSpec};

#[rstest]
fn branch_points_at_the_current_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    assert_eq!(read_branch(dir.path(), "feature"), read_head(dir.path()));
    // creating a branch does not switch to it
    assert_eq!(read_current_branch(dir.path()), "master");
}

#[rstest]
fn creating_a_duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_sprig_command(dir.path(), &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));
}

#[rstest]
fn rm_branch_deletes_only_the_pointer(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    let head = read_head(dir.path());

    run_sprig_command(dir.path(), &["rm-branch", "feature"])
        .assert()
        .success();

    assert!(!dir
        .path()
        .join(".sprig")
        .join("branches")
        .join("feature")
        .exists());
    // the commit the branch pointed at is still stored
    assert!(dir
        .path()
        .join(".sprig")
        .join("commits")
        .join(head)
        .is_file());
}

#[rstest]
fn rm_branch_refuses_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["rm-branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove the current branch."));
}

#[rstest]
fn rm_branch_of_a_missing_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["rm-branch", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn checkout_branch_materializes_its_snapshot(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // diverge master: change 1.txt and add 3.txt
    commit_file(dir.path(), "1.txt", "one v2", "Master work");
    commit_file(dir.path(), "3.txt", "three", "More master work");

    run_sprig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(read_current_branch(dir.path()), "feature");
    assert_eq!(read_head(dir.path()), read_branch(dir.path(), "feature"));
    // files back at the snapshot the branch points to
    assert_eq!(
        std::fs::read_to_string(dir.path().join("1.txt")).unwrap(),
        "one"
    );
    assert!(!dir.path().join("3.txt").exists());
}

#[rstest]
fn checkout_of_the_current_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No need to checkout the current branch.",
        ));
}

#[rstest]
fn checkout_of_a_missing_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["checkout", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such branch exists."));
}

#[rstest]
fn checkout_branch_refuses_to_clobber_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("loose.txt"),
        "precious".to_string(),
    ));

    run_sprig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    // nothing was touched
    assert_eq!(
        std::fs::read_to_string(dir.path().join("loose.txt")).unwrap(),
        "precious"
    );
    assert_eq!(read_current_branch(dir.path()), "master");
}

#[rstest]
fn reset_moves_the_current_branch_and_restores_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    let first_head = read_head(dir.path());
    commit_file(dir.path(), "1.txt", "one v2", "Second commit");

    run_sprig_command(dir.path(), &["reset", &first_head])
        .assert()
        .success();

    assert_eq!(read_head(dir.path()), first_head);
    assert_eq!(read_branch(dir.path(), "master"), first_head);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("1.txt")).unwrap(),
        "one"
    );
}

#[rstest]
fn reset_accepts_an_abbreviated_commit_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    let first_head = read_head(dir.path());
    commit_file(dir.path(), "1.txt", "one v2", "Second commit");

    run_sprig_command(dir.path(), &["reset", &first_head[..10]])
        .assert()
        .success();

    assert_eq!(read_head(dir.path()), first_head);
}

#[rstest]
fn reset_to_an_unknown_commit_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["reset", &"e".repeat(40)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn reset_clears_the_staging_area(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    let first_head = read_head(dir.path());
    commit_file(dir.path(), "1.txt", "one v2", "Second commit");

    write_file(FileSpec::new(dir.path().join("1.txt"), "one v3".to_string()));
    run_sprig_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    run_sprig_command(dir.path(), &["reset", &first_head])
        .assert()
        .success();

    let stage_add = dir.path().join(".sprig").join("stage").join("add");
    assert_eq!(std::fs::read_dir(stage_add).unwrap().count(), 0);
}
