//! Object store
//!
//! Flat, append-only, content-addressed persistence. Two namespaces live
//! under the store root, one file per object:
//!
//! - `blobs/<digest>`: raw file content
//! - `commits/<digest>`: serialized commit metadata
//!
//! Writes are idempotent: storing an object whose digest already exists is
//! a no-op, not an error. Nothing is ever compressed, rewritten, or
//! garbage collected.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join("commits")
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.path.join("blobs")
    }

    /// Persist a blob, returning its id; a no-op when already stored
    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        self.store(&self.blobs_path(), blob)
    }

    /// Persist a commit, returning its id; a no-op when already stored
    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(&self.commits_path(), commit)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.read_object(self.blobs_path().join(object_id.as_ref()))
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.read_object(self.commits_path().join(object_id.as_ref()))?;
        Commit::deserialize(Cursor::new(content))
    }

    /// Slim projection used by graph traversals
    pub fn load_slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.load_commit(object_id)?;

        Ok(SlimCommit {
            oid: object_id.clone(),
            parents: commit.parents(),
        })
    }

    pub fn commit_exists(&self, object_id: &ObjectId) -> bool {
        self.commits_path().join(object_id.as_ref()).exists()
    }

    /// Every commit id in the store, in lexicographic order
    ///
    /// Used by global-log and find, which enumerate the whole commit
    /// namespace rather than walking any particular history.
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.commits_path();
        if !commits_path.exists() {
            return Ok(Vec::new());
        }

        let mut ids = std::fs::read_dir(&commits_path)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                ObjectId::try_parse(entry.file_name().to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        ids.sort();

        Ok(ids)
    }

    /// Find all commits whose id starts with the given prefix
    ///
    /// Used to resolve user-supplied abbreviated ids to their full form.
    /// Returns every match; more than one means the prefix is ambiguous.
    pub fn find_commit_ids_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.len() > OBJECT_ID_LENGTH || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        Ok(self
            .list_commit_ids()?
            .into_iter()
            .filter(|oid| oid.as_ref().starts_with(prefix))
            .collect())
    }

    fn store(&self, namespace: &Path, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = namespace.join(object_id.as_ref());

        // write the object to disk unless it already exists: identical
        // content always lands on the same key, so an existing file is
        // byte-identical by construction
        if !object_path.exists() {
            std::fs::create_dir_all(namespace).context(format!(
                "Unable to create object namespace {}",
                namespace.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
