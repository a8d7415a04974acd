//! Search statistics tracking.

/// Statistics collected during one minimax search.
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Interior nodes whose successors were expanded
    pub nodes_expanded: u64,

    /// Leaf nodes (decided position or depth cutoff)
    pub leaf_nodes: u64,

    /// Leaves won by the searching piece
    pub win_leaves: u64,

    /// Leaves won by the opponent
    pub loss_leaves: u64,

    /// Leaves still undecided at the horizon
    pub undecided_leaves: u64,

    /// Nodes abandoned early because the mover found a forced win
    pub early_exits: u64,

    /// Deepest level reached
    pub max_depth: u8,
}

impl SearchStats {
    /// Record a leaf value from the searching piece's perspective.
    pub fn record_leaf(&mut self, value: i8, depth: u8) {
        self.leaf_nodes += 1;
        if depth > self.max_depth {
            self.max_depth = depth;
        }
        match value {
            1 => self.win_leaves += 1,
            -1 => self.loss_leaves += 1,
            _ => self.undecided_leaves += 1,
        }
    }

    /// Total nodes visited.
    pub fn total_nodes(&self) -> u64 {
        self.nodes_expanded + self.leaf_nodes
    }

    /// One-line summary for per-move logging.
    pub fn summary(&self) -> String {
        format!(
            "nodes={} leaves={} (win={} loss={} open={}) early_exits={} depth={}",
            self.total_nodes(),
            self.leaf_nodes,
            self.win_leaves,
            self.loss_leaves,
            self.undecided_leaves,
            self.early_exits,
            self.max_depth,
        )
    }
}
