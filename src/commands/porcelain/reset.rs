use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch (and HEAD) to an arbitrary commit
    ///
    /// Materializes that commit's snapshot and clears the staging area;
    /// essentially a branch checkout that also rewrites the current
    /// branch pointer. The commit id may be abbreviated.
    pub async fn reset(&mut self, raw_commit_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self
            .resolve_commit_id(raw_commit_id)?
            .ok_or_else(|| anyhow::anyhow!("No commit with that id exists."))?;

        let staging = self.staging();
        let staging = staging.lock().await;

        let (_, head_commit) = self.head_commit()?;
        if !self.untracked_files(&head_commit, &staging)?.is_empty() {
            anyhow::bail!(
                "There is an untracked file in the way; delete it, or add and commit it first."
            );
        }

        let target_commit = self.database().load_commit(&target_oid)?;

        self.workspace()
            .materialize(target_commit.tracked(), self.database())?;
        staging.clear()?;

        self.refs()
            .update_branch(&self.refs().current_branch()?, &target_oid)?;
        self.refs().update_head(&target_oid)?;

        Ok(())
    }
}
