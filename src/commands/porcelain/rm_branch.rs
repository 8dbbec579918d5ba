use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Delete a branch pointer
    ///
    /// Only the pointer goes away; the commits it reached stay in the
    /// store (nothing is ever garbage collected).
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name.to_string())?;

        if !self.refs().branch_exists(&branch) {
            anyhow::bail!("A branch with that name does not exist.");
        }
        if self.refs().is_current_branch(&branch)? {
            anyhow::bail!("Cannot remove the current branch.");
        }

        self.refs().delete_branch(&branch)
    }
}
