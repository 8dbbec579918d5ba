use crate::areas::repository::Repository;

impl Repository {
    pub async fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let staging = self.staging();
        let staging = staging.lock().await;

        if staging.is_staged_for_addition(name) {
            staging.unstage_addition(name)?;
            return Ok(());
        }

        let (_, head_commit) = self.head_commit()?;
        match head_commit.tracked_id(name) {
            Some(blob_id) => {
                staging.stage_removal(name, blob_id)?;
                // remove the working copy unless the user already did
                self.workspace().remove_file(name)?;
            }
            None => anyhow::bail!("No reason to remove the file."),
        }

        Ok(())
    }
}
