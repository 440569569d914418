/// Ranking session controller.
///
/// Drives one pending item at a time through its decision tree, one answer per
/// `decide` call, and splices it into the ranked list once its position is
/// known. No IO: the caller shows the comparison and feeds the answer back.
use tracing::{debug, info};

use crate::error::{RankError, Result};
use crate::progress::{theoretical_item_comparisons, theoretical_total_comparisons, Progress};
use crate::tree::{self, DecisionTree, NodeId};
use crate::types::{Duel, SessionState, Step};

type CompletionCallback<T> = Box<dyn FnOnce(&[T])>;

pub struct RankingSession<T> {
    /// Items in the order they will be placed. Never mutated.
    source: Vec<T>,
    /// Best first. Grows by exactly one item per insertion.
    ranked: Vec<T>,

    /// Tree for the current ranked length, rebuilt after every insertion.
    tree: DecisionTree,
    cursor: NodeId,

    state: SessionState,

    comparisons_this_item: usize,
    total_comparisons: usize,
    /// `total_comparisons` plus boosts for insertions that finished early.
    progress: usize,
    max_progress: usize,

    on_complete: Option<CompletionCallback<T>>,
}

impl<T: Clone> RankingSession<T> {
    /// Accept the first item unconditionally and queue the second.
    ///
    /// A single-item source completes immediately.
    pub fn start(source: Vec<T>) -> Result<Self> {
        Self::init(source, None)
    }

    /// Like `start`, but `on_complete` is called exactly once with the final
    /// ranked list. For a single-item source that happens before this returns.
    pub fn start_with_callback<F>(source: Vec<T>, on_complete: F) -> Result<Self>
    where
        F: FnOnce(&[T]) + 'static,
    {
        Self::init(source, Some(Box::new(on_complete)))
    }

    fn init(source: Vec<T>, on_complete: Option<CompletionCallback<T>>) -> Result<Self> {
        let first = source.first().cloned().ok_or(RankError::EmptyCollection)?;
        let tree = tree::build(1)?;
        let cursor = tree.root();
        let max_progress = theoretical_total_comparisons(source.len());

        let mut session = RankingSession {
            source,
            ranked: vec![first],
            tree,
            cursor,
            state: SessionState::Comparing,
            comparisons_this_item: 0,
            total_comparisons: 0,
            progress: 0,
            max_progress,
            on_complete,
        };

        debug!(items = session.source.len(), max_progress, "ranking session started");

        if session.ranked.len() == session.source.len() {
            session.finish();
        }
        Ok(session)
    }

    /// `(challenger, challengee)`: the ranked item at the cursor and the
    /// pending item. Read-only.
    pub fn current_comparison(&self) -> Result<(&T, &T)> {
        if self.state == SessionState::Complete {
            return Err(RankError::NoPendingComparison);
        }
        let index = self.tree.node(self.cursor).index;
        Ok((&self.ranked[index], &self.source[self.ranked.len()]))
    }

    /// The current comparison together with a progress snapshot.
    pub fn duel(&self) -> Result<Duel<'_, T>> {
        let (challenger, challengee) = self.current_comparison()?;
        Ok(Duel {
            challenger,
            challengee,
            progress: self.progress(),
        })
    }

    /// Record one answer. `prefer_challengee` is true when the pending item
    /// beats the ranked item it was shown against.
    pub fn decide(&mut self, prefer_challengee: bool) -> Result<Step> {
        if self.state == SessionState::Complete {
            return Err(RankError::NoPendingComparison);
        }

        self.comparisons_this_item += 1;
        self.total_comparisons += 1;
        self.progress += 1;

        let node = *self.tree.node(self.cursor);
        if let Some(next) = node.next(prefer_challengee) {
            self.cursor = next;
            let index = self.tree.node(next).index;
            debug!(index, prefer_challengee, "descended decision tree");
            return Ok(Step::Descended { index });
        }

        // Leaf: the position is settled.
        let position = node.insertion_position(prefer_challengee);
        let item = self.source[self.ranked.len()].clone();
        self.ranked.insert(position, item);

        // Count the comparisons this insertion could have needed but didn't,
        // so progress lands exactly on max_progress at the end.
        let bound = theoretical_item_comparisons(self.ranked.len());
        let boost = bound.saturating_sub(self.comparisons_this_item);
        self.progress += boost;

        debug!(
            position,
            comparisons = self.comparisons_this_item,
            boost,
            ranked = self.ranked.len(),
            "inserted item"
        );

        if self.ranked.len() == self.source.len() {
            self.finish();
            return Ok(Step::Complete { position });
        }

        self.tree = tree::build(self.ranked.len())?;
        self.cursor = self.tree.root();
        self.comparisons_this_item = 0;

        Ok(Step::Inserted { position })
    }

    fn finish(&mut self) {
        self.state = SessionState::Complete;
        info!(
            items = self.ranked.len(),
            comparisons = self.total_comparisons,
            progress = self.progress,
            max_progress = self.max_progress,
            "ranking complete"
        );
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(&self.ranked);
        }
    }

    /// Consume the session and return the final ranking, best first.
    pub fn into_ranked(self) -> Result<Vec<T>> {
        if self.state != SessionState::Complete {
            return Err(RankError::Incomplete {
                ranked: self.ranked.len(),
                total: self.source.len(),
            });
        }
        Ok(self.ranked)
    }
}

impl<T> RankingSession<T> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    /// Items ranked so far, best first.
    pub fn ranked(&self) -> &[T] {
        &self.ranked
    }

    /// Item currently being placed. `None` once complete.
    pub fn pending(&self) -> Option<&T> {
        match self.state {
            SessionState::Comparing => self.source.get(self.ranked.len()),
            SessionState::Complete => None,
        }
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub fn comparisons_this_item(&self) -> usize {
        self.comparisons_this_item
    }

    /// Answers given so far, without boosts.
    pub fn total_comparisons(&self) -> usize {
        self.total_comparisons
    }

    pub fn progress(&self) -> Progress {
        let max_item_progress = match self.state {
            SessionState::Comparing => theoretical_item_comparisons(self.ranked.len() + 1),
            SessionState::Complete => 0,
        };
        Progress {
            progress: self.progress,
            max_progress: self.max_progress,
            item_progress: self.comparisons_this_item,
            max_item_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Answer every question truthfully for items whose natural order is the
    /// desired ranking (smaller is better).
    fn rank_by_value(source: Vec<u32>) -> RankingSession<u32> {
        let mut session = RankingSession::start(source).unwrap();
        while !session.is_complete() {
            let (challenger, challengee) = session.current_comparison().unwrap();
            let prefer_challengee = challengee < challenger;
            session.decide(prefer_challengee).unwrap();
        }
        session
    }

    #[test]
    fn test_start_rejects_empty_source() {
        let result = RankingSession::<u32>::start(Vec::new());
        assert!(matches!(result, Err(RankError::EmptyCollection)));
    }

    #[test]
    fn test_single_item_completes_immediately() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let session = RankingSession::start_with_callback(vec!["only"], move |list: &[&'static str]| {
            sink.borrow_mut().push(list.to_vec());
        })
        .unwrap();

        assert!(session.is_complete());
        assert_eq!(session.total_comparisons(), 0);
        assert_eq!(session.pending(), None);
        assert!(matches!(session.current_comparison(), Err(RankError::NoPendingComparison)));
        assert_eq!(*seen.borrow(), vec![vec!["only"]]);
        assert_eq!(session.into_ranked().unwrap(), vec!["only"]);
    }

    #[test]
    fn test_four_item_walkthrough() {
        let mut session = RankingSession::start(vec!['A', 'B', 'C', 'D']).unwrap();
        assert_eq!(session.ranked(), &['A']);
        assert_eq!(session.pending(), Some(&'B'));
        assert!(session.tree().node(session.cursor()).is_leaf());
        assert_eq!(session.current_comparison().unwrap(), (&'A', &'B'));

        // B preferred over A: leaf, no `above`, goes to the front.
        assert_eq!(session.decide(true).unwrap(), Step::Inserted { position: 0 });
        assert_eq!(session.ranked(), &['B', 'A']);
        assert_eq!(session.pending(), Some(&'C'));

        let root = session.tree().node(session.tree().root());
        assert_eq!(root.index, 0);
        assert!(root.above.is_none());
        assert_eq!(session.tree().node(root.below.unwrap()).index, 1);

        // C loses to B, then beats A.
        assert_eq!(session.current_comparison().unwrap(), (&'B', &'C'));
        assert_eq!(session.decide(false).unwrap(), Step::Descended { index: 1 });
        assert_eq!(session.current_comparison().unwrap(), (&'A', &'C'));
        assert_eq!(session.decide(true).unwrap(), Step::Inserted { position: 1 });
        assert_eq!(session.ranked(), &['B', 'C', 'A']);
        assert_eq!(session.pending(), Some(&'D'));

        // D is worst: loses to C (root of [0,2]) then to A.
        assert_eq!(session.current_comparison().unwrap(), (&'C', &'D'));
        assert_eq!(session.decide(false).unwrap(), Step::Descended { index: 2 });
        assert_eq!(session.decide(false).unwrap(), Step::Complete { position: 3 });

        assert!(session.is_complete());
        assert_eq!(session.total_comparisons(), 5);
        assert_eq!(session.into_ranked().unwrap(), vec!['B', 'C', 'A', 'D']);
    }

    #[test]
    fn test_decide_after_complete_fails() {
        let mut session = RankingSession::start(vec![1, 2]).unwrap();
        assert!(session.decide(false).unwrap().is_complete());

        assert_eq!(session.decide(true), Err(RankError::NoPendingComparison));
        assert_eq!(session.total_comparisons(), 1);
        assert_eq!(session.ranked(), &[1, 2]);
    }

    #[test]
    fn test_into_ranked_before_complete_fails() {
        let session = RankingSession::start(vec![1, 2, 3]).unwrap();
        assert_eq!(
            session.into_ranked().err(),
            Some(RankError::Incomplete { ranked: 1, total: 3 })
        );
    }

    #[test]
    fn test_current_comparison_is_idempotent() {
        let mut session = RankingSession::start(vec![5, 3, 8, 1]).unwrap();
        session.decide(true).unwrap();
        let first = session.current_comparison().unwrap();
        let second = session.current_comparison().unwrap();
        assert_eq!(first, second);
        assert_eq!(session.progress(), session.progress());
    }

    #[test]
    fn test_boost_fills_skipped_comparisons() {
        let mut session = RankingSession::start(vec!['A', 'B', 'C']).unwrap();
        session.decide(false).unwrap(); // [A, B]
        assert_eq!(session.progress().progress, 1);

        // Tree over 2 is rooted at index 0 with no `above`: one answer places C
        // at the front, although the worst case for a 3-item result is 2.
        let before = session.progress().progress;
        assert_eq!(session.decide(true).unwrap(), Step::Complete { position: 0 });
        assert_eq!(session.total_comparisons(), 2);
        assert_eq!(session.progress().progress - before, theoretical_item_comparisons(3));
        assert_eq!(session.progress().progress, session.progress().max_progress);
        assert_eq!(session.ranked(), &['C', 'A', 'B']);
    }

    #[test]
    fn test_item_counter_resets_after_insertion() {
        let mut session = RankingSession::start(vec![2, 1, 3, 4]).unwrap();
        session.decide(true).unwrap(); // [1, 2]
        assert_eq!(session.comparisons_this_item(), 0);
        session.decide(false).unwrap();
        assert_eq!(session.comparisons_this_item(), 1);
        assert_eq!(session.progress().item_progress, 1);
        assert_eq!(session.progress().max_item_progress, 2);
    }

    #[test]
    fn test_duel_exposes_pair_and_progress() {
        let session = RankingSession::start(vec!["x", "y", "z"]).unwrap();
        let duel = session.duel().unwrap();
        assert_eq!(*duel.challenger, "x");
        assert_eq!(*duel.challengee, "y");
        assert_eq!(duel.progress.progress, 0);
        assert_eq!(duel.progress.max_progress, 3);
    }

    #[test]
    fn test_sorts_with_consistent_answers() {
        let source = vec![9, 4, 7, 1, 8, 2, 6, 3, 5, 0];
        let session = rank_by_value(source.clone());

        let mut expected = source;
        expected.sort();
        assert_eq!(session.ranked(), expected.as_slice());
        assert_eq!(session.progress().progress, theoretical_total_comparisons(10));
        assert!(session.total_comparisons() <= theoretical_total_comparisons(10));
    }

    #[test]
    fn test_callback_fires_once_with_final_list() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let mut session = RankingSession::start_with_callback(vec![3, 1, 2], move |list: &[i32]| {
            sink.borrow_mut().push(list.to_vec());
        })
        .unwrap();

        while !session.is_complete() {
            let (challenger, challengee) = session.current_comparison().unwrap();
            let prefer = challengee < challenger;
            session.decide(prefer).unwrap();
        }
        let _ = session.decide(true);

        assert_eq!(*calls.borrow(), vec![vec![1, 2, 3]]);
    }
}
