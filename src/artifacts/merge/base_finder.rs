//! Merge base (split point) finder
//!
//! Given two commits, the merge base is a common ancestor used as the
//! reference point of a three-way merge. Picking it by commit timestamp
//! (latest common ancestor wins) is not reproducible under clock skew and
//! breaks ties arbitrarily, so the choice here is distance-based and
//! fully deterministic.
//!
//! ## Algorithm
//!
//! 1. Compute the full ancestor set of the source commit: a reachability
//!    traversal following *both* parent links, cycle-safe via a visited
//!    set (the graph is acyclic by construction, so the visited set is
//!    defensive, not load-bearing).
//! 2. Walk the target commit's ancestry breadth-first, level by level,
//!    where a level is one step of parent distance.
//! 3. The first level containing a member of the source's ancestor set
//!    yields the base; when several commits of that level qualify (e.g.
//!    criss-cross merges), the smallest id wins.
//!
//! The result is always a common ancestor of both inputs: it was reached
//! from the target by parent links and belongs to the source's ancestor
//! set. `None` is only possible for disjoint histories, which cannot
//! happen here because every history shares the synthetic root commit.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature to trace the traversal:
//! `cargo build --features debug_merge`.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Macro for debug logging that is enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "debug_merge"))]
        {
            eprintln!($($arg)*);
        }
    };
}

/// Finds the merge base between two commits
///
/// Generic over a function that loads [`SlimCommit`] data for any given
/// commit id, so it works against the on-disk store in production and an
/// in-memory map in tests.
#[derive(Debug, Clone)]
pub struct MergeBaseFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    /// Function to load commit data for any given commit ID
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> MergeBaseFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every commit reachable from `start`, including `start` itself
    ///
    /// Follows both parent links depth-first with a visited set.
    pub fn ancestors(&self, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut stack = vec![start.clone()];

        while let Some(oid) = stack.pop() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            let commit = (self.commit_loader)(&oid)?;
            for parent in commit.parents {
                if !visited.contains(&parent) {
                    stack.push(parent);
                }
            }
        }

        Ok(visited)
    }

    /// Find the merge base of `source` and `target`
    ///
    /// # Returns
    ///
    /// The nearest (by parent distance from `target`) commit reachable
    /// from both inputs, or `None` when the histories are disjoint.
    pub fn find_merge_base(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let source_ancestors = self.ancestors(source)?;

        let mut visited = HashSet::new();
        let mut level = vec![target.clone()];
        visited.insert(target.clone());

        while !level.is_empty() {
            debug_log!("[merge-base] level: {:?}", level);

            let mut hits = level
                .iter()
                .filter(|oid| source_ancestors.contains(*oid))
                .cloned()
                .collect::<Vec<_>>();

            if !hits.is_empty() {
                // deterministic tie-break between equally near candidates
                hits.sort();
                debug_log!("[merge-base] candidates: {:?}", hits);
                return Ok(Some(hits.swap_remove(0)));
            }

            let mut next_level = Vec::new();
            for oid in &level {
                let commit = (self.commit_loader)(oid)?;
                for parent in commit.parents {
                    if visited.insert(parent.clone()) {
                        next_level.push(parent);
                    }
                }
            }
            next_level.sort();

            level = next_level;
        }

        Ok(None)
    }
}
