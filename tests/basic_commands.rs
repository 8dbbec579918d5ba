use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{
    commit_file, count_blobs, init_repository_dir, read_head, repository_dir, run_sprig_command,
};
use common::file::{write_file, FileSpec};

#[rstest]
fn init_creates_the_store_layout(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty sprig repository"));

    let store = repository_dir.path().join(".sprig");
    assert!(store.join("commits").is_dir());
    assert!(store.join("blobs").is_dir());
    assert!(store.join("branches").join("master").is_file());
    assert!(store.join("stage").join("add").is_dir());
    assert!(store.join("stage").join("remove").is_dir());
    assert!(store.join("CURRENT").is_file());
    assert!(store.join("HEAD").is_file());

    // the root commit exists and the default branch points at it
    let head = read_head(repository_dir.path());
    assert!(store.join("commits").join(&head).is_file());
}

#[rstest]
fn init_twice_fails(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A sprig version-control system already exists in the current directory.",
        ));
}

#[rstest]
fn root_commit_id_is_identical_across_repositories(repository_dir: TempDir) {
    let other_dir = TempDir::new().unwrap();

    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    run_sprig_command(other_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(read_head(repository_dir.path()), read_head(other_dir.path()));
}

#[rstest]
fn commands_require_an_initialized_store(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Not in an initialized sprig directory.",
        ));
}

#[rstest]
fn add_stages_the_file_for_addition(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "hello".to_string(),
    ));

    run_sprig_command(repository_dir.path(), &["add", "f.txt"])
        .assert()
        .success();

    let staged = repository_dir
        .path()
        .join(".sprig")
        .join("stage")
        .join("add")
        .join("f.txt");
    assert!(staged.is_file());
    assert_eq!(std::fs::read_to_string(staged).unwrap(), "hello");
}

#[rstest]
fn adding_a_missing_file_fails(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_sprig_command(repository_dir.path(), &["add", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist."));
}

#[rstest]
fn adding_an_unmodified_tracked_file_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    // the working copy still matches the committed version
    run_sprig_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    let staged = dir.path().join(".sprig").join("stage").join("add").join("1.txt");
    assert!(!staged.exists(), "unmodified file must not stay staged");
}

#[rstest]
fn commit_records_staged_additions(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    commit_file(dir.path(), "3.txt", "three", "Add 3.txt");

    let head = read_head(dir.path());
    let commit = common::command::read_commit_object(dir.path(), &head);
    assert!(commit.contains("3.txt"));
    assert!(commit.contains("Add 3.txt"));

    // staging area consumed
    let stage_add = dir.path().join(".sprig").join("stage").join("add");
    assert_eq!(std::fs::read_dir(stage_add).unwrap().count(), 0);
}

#[rstest]
fn commit_with_nothing_staged_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["commit", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn commit_requires_a_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("3.txt"), "three".to_string()));
    run_sprig_command(dir.path(), &["add", "3.txt"])
        .assert()
        .success();

    run_sprig_command(dir.path(), &["commit", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a commit message."));
}

#[rstest]
fn rm_unstages_a_staged_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("3.txt"), "three".to_string()));
    run_sprig_command(dir.path(), &["add", "3.txt"])
        .assert()
        .success();

    run_sprig_command(dir.path(), &["rm", "3.txt"])
        .assert()
        .success();

    let staged = dir.path().join(".sprig").join("stage").join("add").join("3.txt");
    assert!(!staged.exists());
    // the working copy stays: rm of a merely staged file only unstages
    assert!(dir.path().join("3.txt").is_file());
}

#[rstest]
fn rm_stages_a_tracked_file_for_removal_and_deletes_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["rm", "1.txt"])
        .assert()
        .success();

    assert!(!dir.path().join("1.txt").exists());
    let staged = dir
        .path()
        .join(".sprig")
        .join("stage")
        .join("remove")
        .join("1.txt");
    assert!(staged.is_file());

    run_sprig_command(dir.path(), &["commit", "Remove 1.txt"])
        .assert()
        .success();

    let head = read_head(dir.path());
    let commit = common::command::read_commit_object(dir.path(), &head);
    assert!(!commit.contains("1.txt"));
}

#[rstest]
fn rm_of_an_untracked_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("free.txt"), "x".to_string()));

    run_sprig_command(dir.path(), &["rm", "free.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reason to remove the file."));
}

#[rstest]
fn checkout_file_restores_the_committed_bytes(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    std::fs::remove_file(dir.path().join("1.txt")).unwrap();

    run_sprig_command(dir.path(), &["checkout", "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("1.txt")).unwrap(),
        "one"
    );
}

#[rstest]
fn checkout_file_from_an_older_commit_by_abbreviated_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    let old_head = read_head(dir.path());
    commit_file(dir.path(), "1.txt", "one v2", "Second version");

    assert_eq!(
        std::fs::read_to_string(dir.path().join("1.txt")).unwrap(),
        "one v2"
    );

    let abbreviated = &old_head[..8];
    run_sprig_command(dir.path(), &["checkout", abbreviated, "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("1.txt")).unwrap(),
        "one"
    );
}

#[rstest]
fn checkout_of_a_file_untracked_by_the_commit_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(dir.path(), &["checkout", "--", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist in that commit."));
}

#[rstest]
fn checkout_from_an_unknown_commit_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_sprig_command(
        dir.path(),
        &["checkout", &"d".repeat(40), "--", "1.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn identical_content_under_two_names_stores_two_blobs(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "same bytes".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("b.txt"),
        "same bytes".to_string(),
    ));

    run_sprig_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_sprig_command(repository_dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_sprig_command(repository_dir.path(), &["commit", "Twin files"])
        .assert()
        .success();

    // the blob digest covers the file name, so two entries exist
    assert_eq!(count_blobs(repository_dir.path()), 2);
}

#[rstest]
fn recommitting_identical_content_stores_no_new_blob(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    commit_file(repository_dir.path(), "f.txt", "stable", "First");
    assert_eq!(count_blobs(repository_dir.path()), 1);

    commit_file(repository_dir.path(), "g.txt", "other", "Second");
    // f.txt's blob is reused untouched by the second commit's snapshot
    assert_eq!(count_blobs(repository_dir.path()), 2);
}
