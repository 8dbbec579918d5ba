use crate::areas::repository::Repository;

impl Repository {
    /// Show every commit in the store, in id order
    ///
    /// Unlike `log`, this enumerates the whole commit namespace, so
    /// commits only reachable from other branches (or from merge second
    /// parents) appear too.
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for oid in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            self.show_commit(&oid, &commit)?;
        }

        Ok(())
    }
}
