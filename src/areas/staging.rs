//! Staging area
//!
//! Pending changes waiting to be committed, split into two disjoint
//! path-keyed file namespaces under `stage/`:
//!
//! - `add/<name>`: the content pending addition for that path
//! - `remove/<name>`: the tracked blob digest pending removal
//!
//! A path is never present in both at once: staging for addition clears a
//! pending removal of the same path and vice versa. Every successful
//! commit consumes the whole staging area and clears both namespaces.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct StagingArea {
    /// Path to the staging root (`.sprig/stage`)
    path: Box<Path>,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea { path }
    }

    pub fn additions_path(&self) -> PathBuf {
        self.path.join("add")
    }

    pub fn removals_path(&self) -> PathBuf {
        self.path.join("remove")
    }

    /// Stage content for addition, overwriting any previous entry
    ///
    /// Idempotent; also drops a pending removal of the same path.
    pub fn stage_addition(&self, name: &str, content: &Bytes) -> anyhow::Result<()> {
        self.unstage_removal(name)?;

        std::fs::create_dir_all(self.additions_path())?;
        std::fs::write(self.additions_path().join(name), content)
            .context(format!("Unable to stage {} for addition", name))?;

        Ok(())
    }

    /// Stage a tracked path for removal at the next commit
    ///
    /// The removed blob's digest is retained for merge bookkeeping.
    pub fn stage_removal(&self, name: &str, last_known_id: &ObjectId) -> anyhow::Result<()> {
        self.unstage_addition(name)?;

        std::fs::create_dir_all(self.removals_path())?;
        std::fs::write(self.removals_path().join(name), last_known_id.as_ref())
            .context(format!("Unable to stage {} for removal", name))?;

        Ok(())
    }

    /// Drop a pending addition; a no-op when the path is not staged
    pub fn unstage_addition(&self, name: &str) -> anyhow::Result<()> {
        Self::remove_entry(self.additions_path().join(name))
    }

    /// Drop a pending removal; a no-op when the path is not staged
    pub fn unstage_removal(&self, name: &str) -> anyhow::Result<()> {
        Self::remove_entry(self.removals_path().join(name))
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.additions_path().join(name).is_file()
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removals_path().join(name).is_file()
    }

    /// Snapshot of the staged-for-addition set as (name, content) pairs
    pub fn additions(&self) -> anyhow::Result<BTreeMap<String, Bytes>> {
        Self::list_entries(&self.additions_path())?
            .into_iter()
            .map(|name| {
                let content = std::fs::read(self.additions_path().join(&name))
                    .context(format!("Unable to read staged content for {}", name))?;
                Ok((name, Bytes::from(content)))
            })
            .collect()
    }

    /// Snapshot of the staged-for-removal set as path names, sorted
    pub fn removals(&self) -> anyhow::Result<Vec<String>> {
        Self::list_entries(&self.removals_path())
    }

    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.additions()?.is_empty() && self.removals()?.is_empty())
    }

    /// Empty both namespaces; runs after every successful commit
    pub fn clear(&self) -> anyhow::Result<()> {
        for dir in [self.additions_path(), self.removals_path()] {
            if dir.exists() {
                for entry in std::fs::read_dir(&dir)? {
                    let entry = entry?;
                    std::fs::remove_file(entry.path()).context(format!(
                        "Unable to clear staged entry {}",
                        entry.path().display()
                    ))?;
                }
            }
        }

        Ok(())
    }

    fn remove_entry(path: PathBuf) -> anyhow::Result<()> {
        if path.exists() {
            std::fs::remove_file(&path)
                .context(format!("Unable to unstage {}", path.display()))?;
        }

        Ok(())
    }

    fn list_entries(dir: &Path) -> anyhow::Result<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }
}
