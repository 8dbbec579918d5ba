//! Object types and operations
//!
//! All tracked content is stored as objects identified by SHA-1 hashes.
//! There are two kinds:
//!
//! - **Blob**: one file's content; identity covers the content and name
//! - **Commit**: snapshot with metadata (message, date, parents, tracked set)
//!
//! Objects implement serialization/deserialization for their on-disk form.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
