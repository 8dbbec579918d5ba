use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!(
                "A sprig version-control system already exists in the current directory."
            );
        }

        fs::create_dir_all(self.database().commits_path())
            .context("Failed to create the commits namespace")?;
        fs::create_dir_all(self.database().blobs_path())
            .context("Failed to create the blobs namespace")?;
        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create the branches directory")?;
        fs::create_dir_all(self.staging().lock().await.additions_path())
            .context("Failed to create the staged-additions namespace")?;
        fs::create_dir_all(self.staging().lock().await.removals_path())
            .context("Failed to create the staged-removals namespace")?;

        // the synthetic root commit: same id in every repository, so all
        // histories share a common ancestor
        let root = Commit::root();
        let root_oid = self.database().store_commit(&root)?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs().update_branch(&default_branch, &root_oid)?;
        self.refs().set_current_branch(&default_branch)?;
        self.refs().update_head(&root_oid)?;

        write!(
            self.writer(),
            "Initialized empty sprig repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
