use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

impl Repository {
    /// Show first-parent history from HEAD, most recent first
    ///
    /// Merge second parents are ignored, so the output is a linear
    /// sequence ending at the root commit.
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head_oid = self.refs().read_head()?;

        for (oid, commit) in RevList::new(self.database(), head_oid) {
            self.show_commit(&oid, &commit)?;
        }

        Ok(())
    }

    pub(crate) fn show_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "{}", format!("commit {}", oid).yellow())?;
        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
