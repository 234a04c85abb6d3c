//! Heuristic pruning applied during expansion.
//!
//! Both heuristics run before the depth's node accounting, so pruned
//! branches never count toward the node budget.

use rand::rngs::StdRng;
use rand::Rng;

use super::config::SearchConfig;
use super::tree::{NodeId, SearchTree};

/// Minimum candidate count the handicap never cuts below.
const HANDICAP_KEEP: usize = 4;

/// Randomly discard surplus candidate moves at one of the searching
/// side's own nodes, weakening strong configurations predictably.
/// Applied before expansion, so no child exists for a discarded move.
pub(crate) fn apply_handicap(
    tree: &mut SearchTree,
    id: NodeId,
    config: &SearchConfig,
    rng: &mut StdRng,
) {
    let candidates = tree.node(id).moves.len();
    if config.handicap_percent == 0 || candidates <= HANDICAP_KEEP {
        return;
    }
    let discard = (candidates - HANDICAP_KEEP) * config.handicap_percent as usize / 100;
    let node = tree.node_mut(id);
    for _ in 0..discard {
        let idx = rng.gen_range(0..node.moves.len());
        node.moves.swap_remove(idx);
    }
}

/// Keep only the own moves that most constrain the opponent's freedom.
///
/// Each child's liberty is its number of legal replies; the effective
/// minimum is clipped below by the configured floor, and children with
/// strictly more replies than that are discarded.
pub(crate) fn minimize_liberty(tree: &mut SearchTree, id: NodeId, config: &SearchConfig) {
    let children = &tree.node(id).children;
    if children.len() < 2 {
        return;
    }
    let liberties: Vec<usize> = children
        .iter()
        .map(|&child| tree.node(child).moves.len())
        .collect();
    let minimum = *liberties.iter().min().expect("children is non-empty");
    let threshold = minimum.max(config.reply_floor);
    if liberties.iter().all(|&liberty| liberty <= threshold) {
        return;
    }
    tree.retain_children(id, |idx| liberties[idx] <= threshold);
}
