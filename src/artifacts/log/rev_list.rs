use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// First-parent history walk
///
/// Yields `(id, commit)` pairs starting from `start_oid`, following only
/// first-parent links, most recent first, ending at the root commit. Merge
/// second parents are ignored, so the sequence is linear and each commit
/// appears at most once.
#[derive(Clone, new)]
pub struct RevList<'d> {
    database: &'d Database,
    start_oid: Option<ObjectId>,
}

impl<'d> IntoIterator for RevList<'d> {
    type Item = (ObjectId, Commit);
    type IntoIter = RevListIntoIter<'d>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            database: self.database,
            current_oid: self.start_oid,
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'d> {
    database: &'d Database,
    current_oid: Option<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = (ObjectId, Commit);

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_oid.take()?;

        match self.database.load_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the first parent for the next iteration
                self.current_oid = commit.parent().cloned();
                Some((commit_oid, commit))
            }
            // A dangling parent reference ends the walk
            Err(_) => None,
        }
    }
}
