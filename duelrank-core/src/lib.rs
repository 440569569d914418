//! duelrank-core: Pure-computation insertion ranking engine.
//!
//! Pairwise "which do you prefer?" answers → binary insertion → fully ranked list.
//! No IO, no terminal, no filesystem. Bring your own way of asking the question.
//!
//! The first item is accepted for free. Every later item is placed by walking
//! a binary-search decision tree one answer at a time, so the caller can wait
//! as long as it likes between questions.
//!
//! # Quick start
//!
//! ```rust
//! use duelrank_core::RankingSession;
//!
//! let mut session = RankingSession::start(vec![30, 10, 20]).unwrap();
//!
//! while !session.is_complete() {
//!     let (challenger, challengee) = session.current_comparison().unwrap();
//!     // Smaller numbers rank higher here.
//!     let prefer_challengee = challengee < challenger;
//!     session.decide(prefer_challengee).unwrap();
//! }
//!
//! assert_eq!(session.into_ranked().unwrap(), vec![10, 20, 30]);
//! ```

pub mod error;
pub mod progress;
pub mod session;
pub mod tree;
pub mod types;

// Re-export primary public API at crate root.
pub use error::{RankError, Result};
pub use progress::{theoretical_item_comparisons, theoretical_total_comparisons, Progress};
pub use session::RankingSession;
pub use tree::{build as build_tree, DecisionNode, DecisionTree, NodeId};
pub use types::{Duel, SessionState, Step};
