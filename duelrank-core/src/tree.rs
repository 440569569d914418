/// Binary-search insertion lookup expressed as an explicit decision tree.
///
/// Each node is one comparison: "is the pending item preferred over the ranked
/// item at `index`?". A yes descends `above`, a no descends `below`. When the
/// relevant child is missing the search is over and the node tells you where
/// the pending item goes.
///
/// Nodes live in a flat arena and link to each other by `NodeId`, so a cursor
/// into the tree is a plain `Copy` value the session can hold next to the tree.
use crate::error::{RankError, Result};

/// Handle to a node inside one specific `DecisionTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

/// One comparison against the ranked item at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionNode {
    /// Position in the ranked list at the time the tree was built.
    pub index: usize,
    /// Positions strictly before `index` that are still undecided.
    pub above: Option<NodeId>,
    /// Positions strictly after `index` that are still undecided.
    pub below: Option<NodeId>,
}

impl DecisionNode {
    pub fn is_leaf(&self) -> bool {
        self.above.is_none() && self.below.is_none()
    }

    /// Child to follow for an answer. `None` means the search ends here.
    pub fn next(&self, prefer_challengee: bool) -> Option<NodeId> {
        if prefer_challengee {
            self.above
        } else {
            self.below
        }
    }

    /// Where the pending item lands if the search ends at this node.
    pub fn insertion_position(&self, prefer_challengee: bool) -> usize {
        if prefer_challengee {
            self.index
        } else {
            self.index + 1
        }
    }
}

/// Decision tree covering a ranked list of `len()` items.
///
/// Only valid for the list length it was built over. The session throws it
/// away and builds a new one after every insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionTree {
    nodes: Vec<DecisionNode>,
    length: usize,
}

/// Build the decision tree for inserting one item into a list of `length` items.
///
/// Midpoints use floor division, so on even ranges the first question is
/// asked against the earlier of the two middle items.
pub fn build(length: usize) -> Result<DecisionTree> {
    if length < 1 {
        return Err(RankError::InvalidRange { length });
    }

    let mut nodes = Vec::with_capacity(length);
    build_range(&mut nodes, 0, length - 1);

    Ok(DecisionTree { nodes, length })
}

fn build_range(nodes: &mut Vec<DecisionNode>, lo: usize, hi: usize) -> NodeId {
    let index = (lo + hi) / 2;
    let id = NodeId(nodes.len());
    nodes.push(DecisionNode { index, above: None, below: None });

    if index > lo {
        let above = build_range(nodes, lo, index - 1);
        nodes[id.0].above = Some(above);
    }
    if index < hi {
        let below = build_range(nodes, index + 1, hi);
        nodes[id.0].below = Some(below);
    }

    id
}

impl DecisionTree {
    /// Root is always the first node pushed.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node. Panics if `id` came from a different tree.
    pub fn node(&self, id: NodeId) -> &DecisionNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&DecisionNode> {
        self.nodes.get(id.0)
    }

    /// Length of the ranked list this tree was built over.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Always false: a tree covers at least one ranked item.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of comparisons on the longest root-to-leaf path.
    ///
    /// This is the worst case for one insertion, `floor(log2(len)) + 1`.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root(), 1)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            deepest = deepest.max(depth);
            for child in [node.above, node.below].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// All nodes without children, in list order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.in_order()
            .into_iter()
            .filter(|&id| self.node(id).is_leaf())
            .collect()
    }

    /// Node indices in list order. For a well-formed tree this is `0..len()`.
    pub fn indices(&self) -> Vec<usize> {
        self.in_order()
            .into_iter()
            .map(|id| self.node(id).index)
            .collect()
    }

    /// Nodes visited from the root for a sequence of answers, stopping at the
    /// node where the search ends. Extra answers are ignored.
    pub fn path(&self, answers: &[bool]) -> Vec<NodeId> {
        let mut path = vec![self.root()];
        let mut current = self.root();
        for &prefer_challengee in answers {
            match self.node(current).next(prefer_challengee) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }
        path
    }

    fn in_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = Some(self.root());

        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.node(id).above;
            }
            if let Some(id) = stack.pop() {
                out.push(id);
                current = self.node(id).below;
            }
        }
        out
    }
}
