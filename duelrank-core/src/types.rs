/// Plain data shared between the session and its callers.
use crate::progress::Progress;

/// Lifecycle of a ranking session.
///
/// There is no uninitialized state: a session only exists once `start`
/// accepted a non-empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// Waiting for an answer about the pending item.
    Comparing,
    /// Every source item is ranked. Terminal.
    Complete,
}

/// What a single `decide` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// Moved to the next comparison for the same pending item.
    /// `index` is the ranked position of the new challenger.
    Descended { index: usize },
    /// Pending item placed at `position`; the next item is now pending.
    Inserted { position: usize },
    /// Last item placed at `position`; the ranking is finished.
    Complete { position: usize },
}

impl Step {
    /// Position the pending item was inserted at, if this step inserted one.
    pub fn inserted_at(&self) -> Option<usize> {
        match *self {
            Step::Descended { .. } => None,
            Step::Inserted { position } | Step::Complete { position } => Some(position),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete { .. })
    }
}

/// Everything the presentation layer needs to show one question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duel<'a, T> {
    /// Already-ranked item at the cursor.
    pub challenger: &'a T,
    /// Item waiting to be placed.
    pub challengee: &'a T,
    pub progress: Progress,
}
