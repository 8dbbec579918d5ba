use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the store directory at the workspace root
pub const STORE_DIR: &str = ".sprig";

/// Shortest commit id prefix accepted for abbreviated lookups
const MIN_OID_PREFIX: usize = 4;

/// Request-scoped context object owning the storage areas
///
/// Every command receives one of these instead of reaching for process
/// globals: the object store, staging area, workspace, and refs are all
/// rooted at the repository path, and user-facing output goes through the
/// injected writer so tests can capture it.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    staging: Arc<Mutex<StagingArea>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let store_path = path.join(STORE_DIR);

        let staging = StagingArea::new(store_path.join("stage").into_boxed_path());
        let database = Database::new(store_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(store_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            staging: Arc::new(Mutex::new(staging)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store_path(&self) -> Box<Path> {
        self.path.join(STORE_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn staging(&self) -> Arc<Mutex<StagingArea>> {
        self.staging.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.store_path().exists()
    }

    /// Every command except init runs behind this check
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            anyhow::bail!("Not in an initialized sprig directory.");
        }

        Ok(())
    }

    /// The commit HEAD points to, with its id
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self
            .refs()
            .read_head()?
            .ok_or_else(|| anyhow::anyhow!("HEAD does not point to a commit"))?;
        let commit = self.database().load_commit(&head_oid)?;

        Ok((head_oid, commit))
    }

    /// Resolve a user-supplied commit id, full or abbreviated
    ///
    /// # Returns
    ///
    /// `Some(oid)` for a full id or a unique prefix of at least four hex
    /// characters, `None` when nothing matches; an ambiguous prefix is an
    /// error.
    pub fn resolve_commit_id(&self, raw: &str) -> anyhow::Result<Option<ObjectId>> {
        if raw.len() == OBJECT_ID_LENGTH {
            return match ObjectId::try_parse(raw.to_string()) {
                Ok(oid) if self.database().commit_exists(&oid) => Ok(Some(oid)),
                _ => Ok(None),
            };
        }

        if raw.len() < MIN_OID_PREFIX {
            return Ok(None);
        }

        let mut matches = self.database().find_commit_ids_by_prefix(raw)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches.swap_remove(0))),
            _ => anyhow::bail!("Ambiguous commit id: {}", raw),
        }
    }
}
