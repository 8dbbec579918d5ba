//! References (branches, HEAD, current branch)
//!
//! A branch is a mutable named pointer to a commit digest, stored as one
//! file per branch under `branches/`. Two more files complete the picture:
//!
//! - `CURRENT`: the name of the current branch
//! - `HEAD`: the commit digest the current branch points to
//!
//! HEAD always equals the current branch's pointer except transiently
//! during a commit, before the branch file is advanced.
//!
//! ## Locking
//!
//! Ref-file writes take an exclusive `file_guard` lock so a single update
//! is not torn. This is per-file best effort only: nothing provides
//! transactional isolation across files or across concurrent processes.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the file holding the current branch's name
pub const CURRENT_BRANCH_FILE: &str = "CURRENT";

/// Name of the file holding HEAD's commit digest
pub const HEAD_FILE: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the store root (`.sprig`)
    path: Box<Path>,
}

impl Refs {
    pub fn branches_path(&self) -> Box<Path> {
        self.path.join("branches").into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_FILE).into_boxed_path()
    }

    pub fn current_branch_path(&self) -> Box<Path> {
        self.path.join(CURRENT_BRANCH_FILE).into_boxed_path()
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_oid_file(self.head_path())
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), oid.as_ref().to_string())
    }

    /// The name of the current branch
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let path = self.current_branch_path();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read current branch file at {:?}", path))?;

        BranchName::try_parse(content.trim().to_string())
    }

    pub fn set_current_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.current_branch_path(), name.as_ref().to_string())
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branches_path().join(name.as_ref()).is_file()
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(name == &self.current_branch()?)
    }

    /// Read the commit digest a branch points to
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        self.read_oid_file(self.branches_path().join(name.as_ref()).into_boxed_path())
    }

    /// Point a branch at a commit, creating the branch file if needed
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branches_path().join(name.as_ref()).into_boxed_path();

        self.update_ref_file(branch_path, oid.as_ref().to_string())
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        let branch_path = self.branches_path().join(name.as_ref()).into_boxed_path();

        if !branch_path.exists() {
            anyhow::bail!("branch {} does not exist", name);
        }

        std::fs::remove_file(branch_path.as_ref())
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(branch_path.as_ref())?;

        Ok(())
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let branches_path = self.branches_path();
        if !branches_path.exists() {
            return Ok(Vec::new());
        }

        let mut branches = WalkDir::new(branches_path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(branches_path.as_ref()).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn read_oid_file(&self, path: Box<Path>) -> anyhow::Result<Option<ObjectId>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        // open the ref file as WRONLY and CREAT to write the ref to it
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.branches_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
