//! Commit object
//!
//! Commits are immutable snapshot nodes. They contain:
//! - A commit message
//! - A timestamp (the Unix epoch for the root commit)
//! - Up to two parent commit IDs (none for the root, two for merges)
//! - The full tracked set: one (name, blob id) entry per tracked file
//!
//! ## Format
//!
//! On disk:
//! ```text
//! date <epoch-seconds>
//! parent <parent-sha>
//! merged <merge-parent-sha>
//! track <blob-sha> <file-name>
//!
//! <commit message>
//! ```
//!
//! The tracked set is a complete snapshot, never a delta: a file absent
//! from it is untracked at that commit.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Message carried by the synthetic root commit every history starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Slim projection of a commit
///
/// Carries only what graph traversals need: the commit's id and its parent
/// ids. The merge base finder loads these through a closure so it stays
/// independent of the storage backend.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// First parent, then merge parent if any
    pub parents: Vec<ObjectId>,
}

/// Immutable snapshot node of the history graph
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Commit message (never empty)
    message: String,
    /// Creation time; the Unix epoch for the root commit
    timestamp: DateTime<Utc>,
    /// First parent (None only for the root commit)
    parent: Option<ObjectId>,
    /// Second parent (Some only for merge commits)
    merge_parent: Option<ObjectId>,
    /// Full snapshot: file name -> blob id
    tracked: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<Utc>,
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        tracked: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parent,
            merge_parent,
            tracked,
        }
    }

    /// The synthetic root commit: fixed message, epoch timestamp, no
    /// parents, empty tracked set. Identical across all repositories, so
    /// every history traces back to the same id.
    pub fn root() -> Self {
        Commit {
            message: ROOT_COMMIT_MESSAGE.to_string(),
            timestamp: DateTime::UNIX_EPOCH,
            parent: None,
            merge_parent: None,
            tracked: BTreeMap::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn tracked(&self) -> &BTreeMap<String, ObjectId> {
        &self.tracked
    }

    pub fn tracked_id(&self, name: &str) -> Option<&ObjectId> {
        self.tracked.get(name)
    }

    pub fn is_tracking(&self, name: &str) -> bool {
        self.tracked.contains_key(name)
    }

    /// Format the timestamp in the local timezone for log output
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 01 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&chrono::Local)
            .format("%a %b %d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        lines.push(format!("date {}", self.timestamp.timestamp()));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merged {}", merge_parent.as_ref()));
        }
        for (name, blob_id) in &self.tracked {
            lines.push(format!("track {} {}", blob_id.as_ref(), name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        let content = lines.join("\n");

        let mut commit_bytes = Vec::new();
        commit_bytes.write_all(content.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let date_line = lines
            .next()
            .context("Invalid commit object: missing date line")?;
        let epoch_seconds = date_line
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")?
            .parse::<i64>()
            .context("Invalid commit object: invalid timestamp")?;
        let timestamp = Utc
            .timestamp_opt(epoch_seconds, 0)
            .single()
            .context("Invalid commit object: timestamp out of range")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut tracked = BTreeMap::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                // the blank separator; everything after it is the message
                break;
            }

            if let Some(oid) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(oid) = line.strip_prefix("merged ") {
                merge_parent = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("track ") {
                if entry.len() < OBJECT_ID_LENGTH + 2 {
                    anyhow::bail!("Invalid commit object: invalid track line");
                }
                let (oid, name) = entry.split_at(OBJECT_ID_LENGTH);
                tracked.insert(
                    name[1..].to_string(),
                    ObjectId::try_parse(oid.to_string())?,
                );
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        if message.is_empty() {
            anyhow::bail!("Invalid commit object: missing message");
        }

        Ok(Self::new(message, timestamp, parent, merge_parent, tracked))
    }
}

impl Object for Commit {}
