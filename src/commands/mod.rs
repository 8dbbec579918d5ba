//! Command implementations
//!
//! User-facing commands live under `porcelain`, one file per command,
//! each implemented as methods on [`crate::areas::repository::Repository`].

pub mod porcelain;
