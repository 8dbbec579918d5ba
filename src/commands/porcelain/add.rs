use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub async fn add(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        // tracked paths are plain file names at the workspace root
        if name.contains(['/', '\\']) {
            anyhow::bail!("Nested paths are not supported: {}", name);
        }

        if !self.workspace().file_exists(name) {
            anyhow::bail!("File does not exist.");
        }

        let staging = self.staging();
        let staging = staging.lock().await;

        let content = self.workspace().read_file(name)?;
        let blob = Blob::new(name.to_string(), content.clone());
        let blob_id = blob.object_id()?;

        let (_, head_commit) = self.head_commit()?;

        if head_commit.tracked_id(name) == Some(&blob_id) {
            // the working version matches the current commit: staging it
            // would be a no-op, so drop any pending entries instead
            staging.unstage_addition(name)?;
            staging.unstage_removal(name)?;
        } else {
            staging.stage_addition(name, &content)?;
        }

        Ok(())
    }
}
