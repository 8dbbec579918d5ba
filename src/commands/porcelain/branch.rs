use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Create a branch pointing at the current HEAD commit
    ///
    /// Does not switch to the new branch.
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name.to_string())?;

        if self.refs().branch_exists(&branch) {
            anyhow::bail!("A branch with that name already exists.");
        }

        let (head_oid, _) = self.head_commit()?;
        self.refs().update_branch(&branch, &head_oid)?;

        Ok(())
    }
}
