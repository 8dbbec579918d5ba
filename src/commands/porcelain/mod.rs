//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage a file for the next commit
//! - `commit`: Create a new commit from the staging area
//! - `rm`: Unstage a file or stage it for removal
//! - `log`: Show first-parent history from HEAD
//! - `global_log`: Show every commit in the store
//! - `find`: Print ids of commits with a given message
//! - `status`: Show branches, staged changes, and untracked files
//! - `checkout`: Restore a file or switch branches
//! - `branch` / `rm_branch`: Create or delete a branch pointer
//! - `reset`: Move the current branch to an arbitrary commit
//! - `merge`: Three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod global_log;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod rm_branch;
pub mod status;
