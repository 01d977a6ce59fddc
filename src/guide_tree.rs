/*!
The guide tree that drives the progressive merge order.
Terminals get ids `1..=N` in the order they are provided, and internal nodes get ids starting at `N+1`.
`build_tree` always produces a right-branching chain: node `N+1` joins terminals 1 and 2, and every later node joins the previous node with the next terminal.

# Example usage
```rust
use progressive_msa::guide_tree::{build_tree, Operand};

let tree = build_tree(&["s1", "s2", "s3"]);
assert_eq!(tree.num_terminals(), 3);
assert_eq!(tree.node(4), Some((Operand::Terminal(1), Operand::Terminal(2))));
assert_eq!(tree.node(5), Some((Operand::Internal(4), Operand::Terminal(3))));
assert_eq!(tree.root_id(), Some(5));
```
*/

use log::debug;

/// One side of a merge: either an input sequence or a previously merged node
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operand {
    /// Terminal id in `1..=N`
    Terminal(usize),
    /// Internal node id in `N+1..`
    Internal(usize)
}

impl Operand {
    /// The numeric node id, regardless of kind
    pub fn id(&self) -> usize {
        match self {
            Operand::Terminal(id) | Operand::Internal(id) => *id
        }
    }
}

/// Binary guide tree stored as two dense tables
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GuideTree {
    /// Sequence label of terminal `i+1`
    terminals: Vec<String>,
    /// Operands of internal node `N+1+i`
    internal_nodes: Vec<(Operand, Operand)>
}

impl GuideTree {
    /// Creates a tree from raw tables without checking them.
    /// The progressive executor validates every operand before it is used, so malformed trees are reported there.
    /// # Arguments
    /// * `terminals` - labels of terminals `1..=N`
    /// * `internal_nodes` - operands of internal nodes `N+1..`, in merge order
    pub fn from_parts(terminals: Vec<String>, internal_nodes: Vec<(Operand, Operand)>) -> GuideTree {
        GuideTree {
            terminals,
            internal_nodes
        }
    }

    /// Label of the terminal with the given id, if it exists
    pub fn terminal_label(&self, terminal_id: usize) -> Option<&str> {
        if terminal_id == 0 {
            return None;
        }
        self.terminals.get(terminal_id - 1).map(|s| s.as_str())
    }

    /// Operands of the internal node with the given id, if it exists
    pub fn node(&self, node_id: usize) -> Option<(Operand, Operand)> {
        let offset = self.terminals.len() + 1;
        if node_id < offset {
            return None;
        }
        self.internal_nodes.get(node_id - offset).copied()
    }

    /// Iterates over `(node_id, left, right)` in increasing node id order, which is also the merge order
    pub fn internal_nodes(&self) -> impl Iterator<Item = (usize, Operand, Operand)> + '_ {
        let offset = self.terminals.len() + 1;
        self.internal_nodes.iter()
            .enumerate()
            .map(move |(i, &(l, r))| (offset + i, l, r))
    }

    /// The final merge, or `None` when there are no internal nodes
    pub fn root_id(&self) -> Option<usize> {
        if self.internal_nodes.is_empty() {
            None
        } else {
            Some(self.terminals.len() + self.internal_nodes.len())
        }
    }

    /// Total ids in use, terminals and internal nodes together
    pub fn num_nodes(&self) -> usize {
        self.terminals.len() + self.internal_nodes.len()
    }

    // Getters
    pub fn terminal_labels(&self) -> &[String] {
        &self.terminals
    }

    pub fn num_terminals(&self) -> usize {
        self.terminals.len()
    }

    pub fn num_internal_nodes(&self) -> usize {
        self.internal_nodes.len()
    }
}

/// Builds the right-branching chain for an ordered list of sequence ids.
/// With fewer than two ids there are no internal nodes.
/// # Arguments
/// * `ordered_ids` - sequence ids in the order they should be merged
pub fn build_tree<S: AsRef<str>>(ordered_ids: &[S]) -> GuideTree {
    let terminals: Vec<String> = ordered_ids.iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    let n = terminals.len();

    let mut internal_nodes: Vec<(Operand, Operand)> = vec![];
    if n >= 2 {
        internal_nodes.push((Operand::Terminal(1), Operand::Terminal(2)));
        for j in 3..=n {
            // the previous node was assigned id n + (j - 2)
            let previous = n + j - 2;
            internal_nodes.push((Operand::Internal(previous), Operand::Terminal(j)));
        }
    }
    debug!("Built guide tree with {} terminals and {} internal nodes", n, internal_nodes.len());

    GuideTree {
        terminals,
        internal_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single() {
        let empty: [&str; 0] = [];
        let tree = build_tree(&empty);
        assert_eq!(tree.num_terminals(), 0);
        assert_eq!(tree.num_internal_nodes(), 0);
        assert_eq!(tree.root_id(), None);

        let tree = build_tree(&["s1"]);
        assert_eq!(tree.num_terminals(), 1);
        assert_eq!(tree.num_internal_nodes(), 0);
        assert_eq!(tree.terminal_label(1), Some("s1"));
        assert_eq!(tree.root_id(), None);
    }

    #[test]
    fn test_chain_shape() {
        for n in 2..10 {
            let ids: Vec<String> = (0..n).map(|i| format!("seq_{i}")).collect();
            let tree = build_tree(&ids);
            assert_eq!(tree.num_internal_nodes(), n - 1);
            assert_eq!(tree.root_id(), Some(2 * n - 1));
            assert_eq!(tree.num_nodes(), 2 * n - 1);

            let nodes: Vec<(usize, Operand, Operand)> = tree.internal_nodes().collect();
            assert_eq!(nodes[0], (n + 1, Operand::Terminal(1), Operand::Terminal(2)));
            for (i, &(node_id, left, right)) in nodes.iter().enumerate().skip(1) {
                // every later node hangs off the one before it
                assert_eq!(node_id, n + 1 + i);
                assert_eq!(left, Operand::Internal(node_id - 1));
                assert_eq!(right, Operand::Terminal(i + 2));
            }
        }
    }

    #[test]
    fn test_lookups() {
        let tree = build_tree(&["a", "b", "c", "d"]);
        assert_eq!(tree.terminal_labels(), &["a", "b", "c", "d"]);
        assert_eq!(tree.terminal_label(0), None);
        assert_eq!(tree.terminal_label(4), Some("d"));
        assert_eq!(tree.terminal_label(5), None);

        assert_eq!(tree.node(4), None);
        assert_eq!(tree.node(5), Some((Operand::Terminal(1), Operand::Terminal(2))));
        assert_eq!(tree.node(7), Some((Operand::Internal(6), Operand::Terminal(4))));
        assert_eq!(tree.node(8), None);
        assert_eq!(Operand::Internal(6).id(), 6);
    }
}
