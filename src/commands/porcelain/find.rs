use crate::areas::repository::Repository;

impl Repository {
    /// Print the ids of every commit with exactly the given message
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut found = false;
        for oid in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;

            if commit.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            anyhow::bail!("Found no commit with that message.");
        }

        Ok(())
    }
}
