//! Search tree arena.
//!
//! Nodes live in an index-addressed arena with a free list; a parent
//! owns its children through their indices and nothing else holds node
//! references, so releasing a subtree can never leave a dangling edge.
//! The tree for one search is owned by the caller of the driver and
//! must be released before the next search starts: trees compound
//! across moves otherwise, and a process hosting many concurrent games
//! will exhaust memory.

use rand::rngs::StdRng;

use crate::board::{Move, MoveList, Position};

use super::config::SearchConfig;
use super::valuation;

pub type NodeId = usize;

/// Per-subtree outcome classification for the searching side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opportunity {
    Win,
    Mixed,
    Loss,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// Position snapshot after the move leading here
    pub position: Position,
    /// Candidate moves from this node, parallel to `children` once
    /// expanded
    pub moves: MoveList,
    /// The candidate set is capture-mandated
    pub forced_moves: bool,
    pub children: Vec<NodeId>,
    pub expanded: bool,
    pub static_value: i32,
    /// Backpropagated ("solver") valuation
    pub deep_value: i32,
    /// This subtree is a forced line
    pub forced: bool,
    /// Plies to a known decided outcome, 0 when unknown
    pub sequence: u32,
    pub opportunity: Option<Opportunity>,
}

impl Node {
    fn from_position(position: Position, config: &SearchConfig, rng: &mut StdRng) -> Node {
        let mut set = position.legal_moves(&config.move_rules());
        if config.randomize {
            set.shuffle(rng);
        }
        let static_value = valuation::static_value(&position, set.moves.is_empty(), config);
        Node {
            position,
            forced_moves: set.captures,
            moves: set.moves,
            children: Vec::new(),
            expanded: false,
            static_value,
            deep_value: static_value,
            forced: false,
            sequence: 0,
            opportunity: None,
        }
    }
}

/// Arena-backed game tree rooted at one position.
pub struct SearchTree {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: NodeId,
}

impl SearchTree {
    pub(crate) fn new(position: Position, config: &SearchConfig, rng: &mut StdRng) -> Self {
        let root_node = Node::from_position(position, config, rng);
        SearchTree {
            slots: vec![Some(root_node)],
            free: Vec::new(),
            root: 0,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.slots[id]
            .as_ref()
            .expect("search tree addressed a released node")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id]
            .as_mut()
            .expect("search tree addressed a released node")
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id] = Some(node);
            id
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    /// Create this node's children, once. Each child snapshots the
    /// parent position with one candidate move applied and the side to
    /// move flipped.
    pub(crate) fn expand(&mut self, id: NodeId, config: &SearchConfig, rng: &mut StdRng) {
        if self.node(id).expanded {
            return;
        }
        let position = self.node(id).position.clone();
        let moves = self.node(id).moves.clone();
        let mut children = Vec::with_capacity(moves.len());
        for mv in moves.iter() {
            let mut child_position = position.clone();
            child_position.apply_move(*mv);
            let child = Node::from_position(child_position, config, rng);
            children.push(self.alloc(child));
        }
        let node = self.node_mut(id);
        node.children = children;
        node.expanded = true;
    }

    /// Detach and free all descendants of `id`, leaving the node itself
    /// in place as an unexpanded leaf. Idempotent on leaves.
    pub fn release(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        let mut stack = std::mem::take(&mut node.children);
        node.expanded = false;
        while let Some(current) = stack.pop() {
            let node = self.slots[current]
                .take()
                .expect("release encountered an already-freed node");
            stack.extend(node.children);
            self.free.push(current);
        }
    }

    /// Keep only the (move, child) pairs approved by `keep`, releasing
    /// the discarded subtrees.
    pub(crate) fn retain_children<F: Fn(usize) -> bool>(&mut self, id: NodeId, keep: F) {
        let children = self.node(id).children.clone();
        let moves = self.node(id).moves.clone();
        let mut kept_moves = MoveList::new();
        let mut kept_children = Vec::new();
        for (idx, &child) in children.iter().enumerate() {
            if keep(idx) {
                kept_moves.push(moves[idx]);
                kept_children.push(child);
            } else {
                self.release(child);
                self.slots[child] = None;
                self.free.push(child);
            }
        }
        let node = self.node_mut(id);
        node.moves = kept_moves;
        node.children = kept_children;
    }

    /// Number of live (allocated) nodes in the arena.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of nodes reachable from the root.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(&self.node(id).children);
        }
        count
    }

    /// The move leading from `id` to its `child_idx`-th child.
    pub(crate) fn move_to_child(&self, id: NodeId, child_idx: usize) -> Move {
        self.node(id).moves[child_idx]
    }
}
