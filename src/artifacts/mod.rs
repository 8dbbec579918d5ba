//! Data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch name validation
//! - `core`: Shared utilities (pager wrapper, etc.)
//! - `log`: Commit history traversal
//! - `merge`: Merge base finding and three-way classification
//! - `objects`: Object types (blob, commit)

pub mod branch;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
