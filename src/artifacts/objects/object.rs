use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    /// The bytes the object's identity is computed over.
    ///
    /// Defaults to the serialized (on-disk) form. Blobs override this: their
    /// identity covers the content *and* the file name, while only the raw
    /// content is stored, so two files with identical content but different
    /// names produce two distinct store entries.
    fn digest_input(&self) -> Result<Bytes> {
        self.serialize()
    }

    // TODO: cache the computed id to avoid rehashing on repeated calls
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.digest_input()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}
