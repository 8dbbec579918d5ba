use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::base_finder::MergeBaseFinder;
use crate::artifacts::merge::resolution::{classify, conflict_file_content, MergeOutcome};
use std::collections::BTreeSet;

impl Repository {
    /// Three-way merge of `branch_name` into the current branch
    ///
    /// Classifies every path tracked by the current commit, the given
    /// branch's commit, or their split point, applies the outcome to the
    /// working tree and staging area, then records a merge commit with
    /// both parents. Conflicts do not abort the merge; they leave marker
    /// blocks behind and are reported after the commit.
    pub async fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let given_branch = BranchName::try_parse(branch_name.to_string())?;

        {
            let staging = self.staging();
            let staging = staging.lock().await;
            if !staging.is_empty()? {
                anyhow::bail!("You have uncommitted changes.");
            }
        }

        if !self.refs().branch_exists(&given_branch) {
            anyhow::bail!("A branch with that name does not exist.");
        }
        let current_branch = self.refs().current_branch()?;
        if given_branch == current_branch {
            anyhow::bail!("Cannot merge a branch with itself.");
        }

        let (head_oid, current_commit) = self.head_commit()?;
        let given_oid = self
            .refs()
            .read_branch(&given_branch)?
            .ok_or_else(|| anyhow::anyhow!("branch {} does not point to a commit", given_branch))?;
        let given_commit = self.database().load_commit(&given_oid)?;

        let split_oid = {
            let finder = MergeBaseFinder::new(|oid| self.database().load_slim_commit(oid));
            finder
                .find_merge_base(&head_oid, &given_oid)?
                .ok_or_else(|| anyhow::anyhow!("no common ancestor between the branches"))?
        };

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split_oid == head_oid {
            // the current branch has no commits of its own since the
            // split: move its pointer instead of creating a merge commit
            let staging = self.staging();
            let staging = staging.lock().await;

            let untracked = self.untracked_files(&current_commit, &staging)?;
            if untracked.iter().any(|name| given_commit.is_tracking(name)) {
                anyhow::bail!(
                    "There is an untracked file in the way; delete it, or add and commit it first."
                );
            }

            self.workspace()
                .materialize(given_commit.tracked(), self.database())?;
            staging.clear()?;
            self.refs().update_branch(&current_branch, &given_oid)?;
            self.refs().update_head(&given_oid)?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split_commit = self.database().load_commit(&split_oid)?;

        let mut conflicted = false;
        {
            let staging = self.staging();
            let staging = staging.lock().await;

            // refuse to clobber untracked files before mutating anything
            let untracked = self.untracked_files(&current_commit, &staging)?;
            if untracked
                .iter()
                .any(|name| given_commit.is_tracking(name))
            {
                anyhow::bail!(
                    "There is an untracked file in the way; delete it, or add and commit it first."
                );
            }

            let names = current_commit
                .tracked()
                .keys()
                .chain(given_commit.tracked().keys())
                .chain(split_commit.tracked().keys())
                .cloned()
                .collect::<BTreeSet<_>>();

            for name in names {
                let current_id = current_commit.tracked_id(&name);
                let given_id = given_commit.tracked_id(&name);
                let split_id = split_commit.tracked_id(&name);

                match classify(current_id, given_id, split_id) {
                    MergeOutcome::TakeGiven => {
                        if let Some(blob_id) = given_id {
                            let content = self.database().load_blob(blob_id)?;
                            self.workspace().write_file(&name, &content)?;
                            staging.stage_addition(&name, &content)?;
                        }
                    }
                    MergeOutcome::RemoveCurrent => {
                        if let Some(blob_id) = current_id {
                            self.workspace().remove_file(&name)?;
                            staging.stage_removal(&name, blob_id)?;
                        }
                    }
                    MergeOutcome::Conflict => {
                        conflicted = true;

                        let current_content = match current_id {
                            Some(blob_id) => Some(self.database().load_blob(blob_id)?),
                            None => None,
                        };
                        let given_content = match given_id {
                            Some(blob_id) => Some(self.database().load_blob(blob_id)?),
                            None => None,
                        };

                        let merged =
                            conflict_file_content(current_content.as_ref(), given_content.as_ref());
                        self.workspace().write_file(&name, &merged)?;
                        staging.stage_addition(&name, &merged)?;
                    }
                    MergeOutcome::KeepCurrent
                    | MergeOutcome::LeaveAbsent
                    | MergeOutcome::Unchanged => {}
                }
            }
        }

        let message = format!("Merged {} into {}.", given_branch, current_branch);
        self.commit_from_staging(&message, Some(given_oid)).await?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }
}
