//! Final move selection from the scored tree.

use rand::rngs::StdRng;
use rand::Rng;

use crate::board::{Color, Move};

use super::config::SearchConfig;
use super::tree::{Opportunity, SearchTree};
use super::valuation::WIN_VALUE;

fn opportunity_rank(tag: Option<Opportunity>) -> u8 {
    match tag {
        Some(Opportunity::Win) => 3,
        Some(Opportunity::Mixed) => 2,
        None => 1,
        Some(Opportunity::Loss) => 0,
    }
}

/// Pick one move from the root's children, in the fixed filter order:
/// accelerated sequence, opportunity tag, best static score, extremal
/// deep valuation, uniform random tie-break.
///
/// An empty candidate set after filtering can only mean a programming
/// error upstream, never a legitimate game state, and aborts loudly.
pub(crate) fn select_move(
    tree: &SearchTree,
    maximizer: Color,
    config: &SearchConfig,
    rng: &mut StdRng,
) -> Move {
    let root = tree.root();
    let node = tree.node(root);
    let mut candidates: Vec<usize> = (0..node.children.len()).collect();
    assert!(
        !candidates.is_empty(),
        "move selection reached an empty candidate set"
    );

    let child = |idx: usize| tree.node(node.children[idx]);

    // Decided root: prefer the shortest known sequence, winning or
    // losing alike.
    if config.accelerated_endgame && node.deep_value.abs() == WIN_VALUE {
        let shortest = candidates
            .iter()
            .map(|&idx| child(idx).sequence)
            .filter(|&s| s > 0)
            .min();
        if let Some(shortest) = shortest {
            candidates.retain(|&idx| child(idx).sequence == shortest);
        }
    }

    if config.opportunistic && candidates.len() > 1 {
        let best = candidates
            .iter()
            .map(|&idx| opportunity_rank(child(idx).opportunity))
            .max()
            .expect("candidates is non-empty");
        candidates.retain(|&idx| opportunity_rank(child(idx).opportunity) == best);
    }

    // Deep valuations all tied but statics differing: fall back to the
    // static score closest to ideal for the maximizer.
    if config.best_static && candidates.len() > 1 {
        let deep_tied = candidates
            .windows(2)
            .all(|w| child(w[0]).deep_value == child(w[1]).deep_value);
        let statics_differ = candidates
            .windows(2)
            .any(|w| child(w[0]).static_value != child(w[1]).static_value);
        if deep_tied && statics_differ {
            let best = extremal_by(&candidates, maximizer, |idx| child(idx).static_value);
            candidates.retain(|&idx| child(idx).static_value == best);
        }
    }

    let best = extremal_by(&candidates, maximizer, |idx| child(idx).deep_value);
    candidates.retain(|&idx| child(idx).deep_value == best);
    assert!(
        !candidates.is_empty(),
        "move selection reached an empty candidate set"
    );

    let pick = candidates[rng.gen_range(0..candidates.len())];
    tree.move_to_child(root, pick)
}

fn extremal_by<F: Fn(usize) -> i32>(candidates: &[usize], toward: Color, value: F) -> i32 {
    let mut best = value(candidates[0]);
    for &idx in &candidates[1..] {
        let v = value(idx);
        let improves = match toward {
            Color::White => v > best,
            Color::Black => v < best,
        };
        if improves {
            best = v;
        }
    }
    best
}
