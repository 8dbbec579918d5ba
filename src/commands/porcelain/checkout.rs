use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// `checkout -- <file>`: restore a file from the HEAD commit
    ///
    /// The restored file is not staged.
    pub async fn checkout_file(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (_, head_commit) = self.head_commit()?;
        match head_commit.tracked_id(name) {
            Some(blob_id) => {
                let content = self.database().load_blob(blob_id)?;
                self.workspace().write_file(name, &content)
            }
            None => anyhow::bail!("File does not exist in that commit."),
        }
    }

    /// `checkout <commit> -- <file>`: restore a file from any commit
    ///
    /// The commit id may be abbreviated to a unique prefix.
    pub async fn checkout_file_at(&mut self, raw_commit_id: &str, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_oid = self
            .resolve_commit_id(raw_commit_id)?
            .ok_or_else(|| anyhow::anyhow!("No commit with that id exists."))?;
        let commit = self.database().load_commit(&commit_oid)?;

        match commit.tracked_id(name) {
            Some(blob_id) => {
                let content = self.database().load_blob(blob_id)?;
                self.workspace().write_file(name, &content)
            }
            None => anyhow::bail!("File does not exist in that commit."),
        }
    }

    /// `checkout <branch>`: switch to a branch
    ///
    /// Materializes the branch commit's snapshot (deleting files it does
    /// not track), clears the staging area, and makes the branch current.
    /// Refuses to run when an untracked file would be clobbered.
    pub async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name.to_string())?;

        if !self.refs().branch_exists(&branch) {
            anyhow::bail!("No such branch exists.");
        }
        if self.refs().is_current_branch(&branch)? {
            anyhow::bail!("No need to checkout the current branch.");
        }

        let staging = self.staging();
        let staging = staging.lock().await;

        let (_, head_commit) = self.head_commit()?;
        if !self.untracked_files(&head_commit, &staging)?.is_empty() {
            anyhow::bail!(
                "There is an untracked file in the way; delete it, or add and commit it first."
            );
        }

        let target_oid = self
            .refs()
            .read_branch(&branch)?
            .ok_or_else(|| anyhow::anyhow!("branch {} does not point to a commit", branch))?;
        let target_commit = self.database().load_commit(&target_oid)?;

        self.workspace()
            .materialize(target_commit.tracked(), self.database())?;
        staging.clear()?;

        self.refs().set_current_branch(&branch)?;
        self.refs().update_head(&target_oid)?;

        Ok(())
    }
}
