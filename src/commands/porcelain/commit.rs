use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::Utc;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!("Please enter a commit message.");
        }

        let commit_id = self.commit_from_staging(message, None).await?;

        write!(
            self.writer(),
            "[{}] {}",
            commit_id.to_short_oid(),
            message.lines().next().unwrap_or("")
        )?;

        Ok(())
    }

    /// Build a commit by applying the staging area to HEAD's snapshot
    ///
    /// The new tracked set is HEAD's tracked set plus every staged
    /// addition (whose blobs are persisted here) minus every staged
    /// removal. Advances HEAD, then the current branch, then clears the
    /// staging area. Also the merge commit path, via `merge_parent`.
    pub(crate) async fn commit_from_staging(
        &self,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let staging = self.staging();
        let staging = staging.lock().await;

        let (head_oid, head_commit) = self.head_commit()?;

        let additions = staging.additions()?;
        let removals = staging.removals()?;
        if additions.is_empty() && removals.is_empty() {
            anyhow::bail!("No changes added to the commit.");
        }

        let mut tracked = head_commit.tracked().clone();
        for (name, content) in additions {
            let blob = Blob::new(name.clone(), content);
            let blob_id = self.database().store_blob(&blob)?;
            tracked.insert(name, blob_id);
        }
        for name in removals {
            tracked.remove(&name);
        }

        let commit = Commit::new(
            message.to_string(),
            Utc::now(),
            Some(head_oid),
            merge_parent,
            tracked,
        );
        let commit_id = self.database().store_commit(&commit)?;

        self.refs().update_head(&commit_id)?;
        self.refs()
            .update_branch(&self.refs().current_branch()?, &commit_id)?;
        staging.clear()?;

        Ok(commit_id)
    }
}
