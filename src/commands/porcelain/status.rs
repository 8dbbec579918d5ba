use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use colored::Colorize;
use std::collections::BTreeMap;

// Terminology:
// - untracked files: workspace files neither tracked by HEAD nor staged
// - unstaged changes: tracked or staged files whose workspace content
//   no longer matches what would be committed
impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let staging = self.staging();
        let staging = staging.lock().await;

        let (_, head_commit) = self.head_commit()?;
        let current_branch = self.refs().current_branch()?;

        writeln!(self.writer(), "=== Branches ===")?;
        for branch in self.refs().list_branches()? {
            if branch == current_branch {
                writeln!(self.writer(), "{}", format!("*{}", branch).green())?;
            } else {
                writeln!(self.writer(), "{}", branch)?;
            }
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for name in staging.additions()?.keys() {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for name in staging.removals()? {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Modifications Not Staged For Commit ===")?;
        for (name, state) in self.unstaged_changes(&head_commit, &staging)? {
            writeln!(self.writer(), "{} ({})", name, state)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Untracked Files ===")?;
        for name in self.untracked_files(&head_commit, &staging)? {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }

    /// Workspace files neither tracked by the given commit nor staged for
    /// addition, sorted by name
    ///
    /// Checkout, reset, and merge consult this before mutating anything:
    /// such files would be silently clobbered by materializing a snapshot.
    pub(crate) fn untracked_files(
        &self,
        head_commit: &Commit,
        staging: &StagingArea,
    ) -> anyhow::Result<Vec<String>> {
        let additions = staging.additions()?;

        Ok(self
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| !head_commit.is_tracking(name) && !additions.contains_key(name))
            .collect())
    }

    /// Tracked or staged files whose workspace content differs from what
    /// the next commit would record
    fn unstaged_changes(
        &self,
        head_commit: &Commit,
        staging: &StagingArea,
    ) -> anyhow::Result<BTreeMap<String, &'static str>> {
        let mut changes = BTreeMap::new();

        let additions = staging.additions()?;
        let removals = staging.removals()?;

        // staged content edited or deleted after staging
        for (name, staged_content) in &additions {
            if !self.workspace().file_exists(name) {
                changes.insert(name.clone(), "deleted");
            } else if &self.workspace().read_file(name)? != staged_content {
                changes.insert(name.clone(), "modified");
            }
        }

        // tracked files edited or deleted without staging
        for (name, tracked_id) in head_commit.tracked() {
            if additions.contains_key(name) || removals.contains(name) {
                continue;
            }

            if !self.workspace().file_exists(name) {
                changes.insert(name.clone(), "deleted");
            } else {
                let blob = Blob::new(name.clone(), self.workspace().read_file(name)?);
                if &blob.object_id()? != tracked_id {
                    changes.insert(name.clone(), "modified");
                }
            }
        }

        Ok(changes)
    }
}
