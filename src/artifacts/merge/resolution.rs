//! Three-way merge classification
//!
//! Every path tracked by the current commit, the given commit, or their
//! split point falls into exactly one [`MergeOutcome`]. The classification
//! compares the path's blob id at the three commits (`None` = untracked
//! there); blob ids are name-inclusive content digests, so id equality is
//! content equality for a fixed path.
//!
//! The rows are ordered; the first matching condition wins:
//!
//! | # | condition (c=current, g=given, s=split)   | outcome        |
//! |---|-------------------------------------------|----------------|
//! | 1 | s==c, s!=g, g and s present               | `TakeGiven`    |
//! | 2 | s!=c, s==g, c and s present               | `KeepCurrent`  |
//! | 3 | s and g absent, c present                 | `KeepCurrent`  |
//! | 4 | s and c absent, g present                 | `TakeGiven`    |
//! | 5 | s==c, g absent, s present                 | `RemoveCurrent`|
//! | 6 | s==g, c absent, s present                 | `LeaveAbsent`  |
//! | 7 | s, c, g pairwise distinct                 | `Conflict`     |
//! |   | otherwise (sides agree)                   | `Unchanged`    |
//!
//! Row 7 covers every genuine divergence, including one side deleting a
//! file the other side modified.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

/// What the merge does with one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Load the given side's version and stage it for addition
    TakeGiven,
    /// Keep the current working version untouched
    KeepCurrent,
    /// Delete from the working tree and stage for removal
    RemoveCurrent,
    /// The path stays absent
    LeaveAbsent,
    /// Both sides diverged: synthesize conflict markers and stage them
    Conflict,
    /// No side changed anything worth acting on
    Unchanged,
}

/// Classify one path against the merge base
///
/// # Arguments
///
/// * `current` - blob id at the current (HEAD) commit, if tracked
/// * `given` - blob id at the given branch's commit, if tracked
/// * `split` - blob id at the split point, if tracked
pub fn classify(
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
    split: Option<&ObjectId>,
) -> MergeOutcome {
    let (c, g, s) = (current, given, split);

    if g.is_some() && s.is_some() && s == c && s != g {
        // modified only in given
        MergeOutcome::TakeGiven
    } else if c.is_some() && s.is_some() && s != c && s == g {
        // modified only in current
        MergeOutcome::KeepCurrent
    } else if s.is_none() && g.is_none() && c.is_some() {
        // added only in current since the split
        MergeOutcome::KeepCurrent
    } else if s.is_none() && c.is_none() && g.is_some() {
        // added only in given since the split
        MergeOutcome::TakeGiven
    } else if s.is_some() && g.is_none() && s == c {
        // unmodified in current, removed in given
        MergeOutcome::RemoveCurrent
    } else if s.is_some() && c.is_none() && s == g {
        // unmodified in given, removed in current
        MergeOutcome::LeaveAbsent
    } else if s != c && c != g && s != g {
        // three-way divergence (deletion on one side included)
        MergeOutcome::Conflict
    } else {
        MergeOutcome::Unchanged
    }
}

/// Synthesize the conflicted file body for a diverged path
///
/// A side that deleted the file contributes empty content.
pub fn conflict_file_content(current: Option<&Bytes>, given: Option<&Bytes>) -> Bytes {
    let empty = Bytes::new();
    let current = current.unwrap_or(&empty);
    let given = given.unwrap_or(&empty);

    let mut content = Vec::with_capacity(current.len() + given.len() + 32);
    content.extend_from_slice(b"<<<<<<< HEAD\n");
    content.extend_from_slice(current);
    content.extend_from_slice(b"=======\n");
    content.extend_from_slice(given);
    content.extend_from_slice(b">>>>>>>\n");

    Bytes::from(content)
}
