//! Working-tree synchronizer
//!
//! The workspace is the directory whose files are under version control.
//! Tracked paths are plain file names at the workspace root; the store
//! directory itself is never listed or touched.
//!
//! `materialize` turns the workspace into an exact image of a commit's
//! tracked set: files absent from the target set are deleted first, then
//! every tracked blob is written out, overwriting as needed. Checkout,
//! reset, and merge all go through it; the callers are responsible for
//! refusing to clobber untracked files beforehand.

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".sprig", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Plain files at the workspace root, sorted by name
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if IGNORED_PATHS.contains(&name.as_str()) {
                    None
                } else {
                    Some(name)
                }
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);

        let content = std::fs::read(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, name: &str, content: &Bytes) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .context(format!("Unable to open file {}", file_path.display()))?;

        file.write_all(content)
            .context(format!("Unable to write file {}", file_path.display()))?;

        Ok(())
    }

    /// Delete a workspace file; a no-op when it does not exist
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .context(format!("Unable to remove file {}", file_path.display()))?;
        }

        Ok(())
    }

    /// Make the workspace an exact image of the given tracked set
    ///
    /// Deletes every listed file that is not a key of `tracked`, then
    /// writes each tracked blob's content, creating or overwriting the
    /// file as needed.
    pub fn materialize(
        &self,
        tracked: &BTreeMap<String, ObjectId>,
        database: &Database,
    ) -> anyhow::Result<()> {
        for name in self.list_files()? {
            if !tracked.contains_key(&name) {
                self.remove_file(&name)?;
            }
        }

        for (name, blob_id) in tracked {
            let content = database.load_blob(blob_id)?;
            self.write_file(name, &content)?;
        }

        Ok(())
    }
}
