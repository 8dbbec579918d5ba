//! Blob object
//!
//! Blobs store the content of one file at one point in time. The stored
//! bytes are the raw file content; the identity hash additionally covers
//! the file's name, so renaming a file yields a new blob even when the
//! bytes are unchanged.

use crate::artifacts::objects::object::{Object, Packable};
use bytes::Bytes;
use derive_new::new;

/// File content snapshot, addressed by a digest of (content, name)
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Blob {
    /// Logical file name the content was captured under
    name: String,
    /// Raw file content
    content: Bytes,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Object for Blob {
    fn digest_input(&self) -> anyhow::Result<Bytes> {
        let mut input = Vec::with_capacity(self.content.len() + self.name.len());
        input.extend_from_slice(&self.content);
        input.extend_from_slice(self.name.as_bytes());

        Ok(Bytes::from(input))
    }
}
