//! Static valuation and deep-score backpropagation.
//!
//! Scores are absolute: positive always favors White and the win
//! sentinel is the extreme of the ordering. Material counts against its
//! owner, since shedding pieces is how a side approaches the win in
//! this variant.

use crate::board::{Color, Piece, Position};

use super::config::SearchConfig;
use super::tree::{NodeId, Opportunity, SearchTree};

/// The "infinite" win sentinel, 8^8 + 1.
pub const WIN_VALUE: i32 = 16_777_217;

/// The sentinel signed toward the winning side.
#[inline]
#[must_use]
pub(crate) fn win_score(side: Color) -> i32 {
    side.sign() * WIN_VALUE
}

#[inline]
fn better(a: i32, b: i32, maximizer: Color) -> bool {
    match maximizer {
        Color::White => a > b,
        Color::Black => a < b,
    }
}

/// Static valuation of a position whose move set emptiness is already
/// known.
///
/// A side with no material left cannot move on its turn and has
/// therefore won; likewise a side to move with no legal move has won
/// outright. Otherwise the configured material values are summed
/// against each owner, with active pawns revalued once off their
/// starting rank.
pub(crate) fn static_value(position: &Position, no_moves: bool, config: &SearchConfig) -> i32 {
    for color in Color::BOTH {
        if position.material_count(color) == 0 {
            return win_score(color);
        }
    }
    if no_moves {
        return win_score(position.side_to_move());
    }

    let mut score = 0;
    for (sq, color, piece) in position.occupied() {
        let active = config.active_pawns
            && piece == Piece::Pawn
            && sq.rank() != color.pawn_start_rank();
        score -= color.sign() * config.values.value_of(piece, active);
    }
    score
}

/// Post-order deep-score aggregation, relative to the side the search
/// runs for.
///
/// Forced (capture-mandated) lines are narrowed to their extremal
/// continuation and never softened by averaging; decided subtrees carry
/// a ply count so move selection can prefer the fastest resolution.
pub(crate) fn backpropagate(
    tree: &mut SearchTree,
    id: NodeId,
    maximizer: Color,
    config: &SearchConfig,
) {
    let children = tree.node(id).children.clone();

    if children.is_empty() {
        let node = tree.node_mut(id);
        node.deep_value = node.static_value;
        node.forced = true;
        if node.deep_value == win_score(maximizer) {
            node.sequence = 1;
            node.opportunity = Some(Opportunity::Win);
        } else if node.deep_value == win_score(maximizer.opponent()) {
            node.sequence = 1;
            node.opportunity = Some(Opportunity::Loss);
        }
        return;
    }

    for &child in &children {
        backpropagate(tree, child, maximizer, config);
    }

    let owned = tree.node(id).position.side_to_move() == maximizer;
    let capture_entered = tree.node(id).forced_moves;
    let forced_branch: Vec<bool> = children
        .iter()
        .map(|&c| capture_entered && tree.node(c).forced)
        .collect();

    // Both-sides semantics: one forced branch suffices at the
    // maximizer's own node, the opponent needs all of them forced.
    let forced = if owned {
        forced_branch.iter().any(|&f| f)
    } else {
        forced_branch.iter().all(|&f| f)
    };

    let mut opportunity = None;
    for &child in &children {
        if let Some(tag) = tree.node(child).opportunity {
            opportunity = Some(match opportunity {
                None => tag,
                Some(previous) if previous == tag => tag,
                Some(_) => Opportunity::Mixed,
            });
        }
    }

    // Forced branches cannot be softened by averaging: narrow the
    // maximizer's node to the forced children at the extremal value.
    if owned && forced_branch.iter().any(|&f| f) {
        let mut best: Option<i32> = None;
        for (idx, &child) in children.iter().enumerate() {
            if forced_branch[idx] {
                let value = tree.node(child).deep_value;
                if best.is_none() || better(value, best.unwrap(), maximizer) {
                    best = Some(value);
                }
            }
        }
        let best = best.expect("at least one forced child exists");
        let keep: Vec<bool> = children
            .iter()
            .enumerate()
            .map(|(idx, &child)| forced_branch[idx] && tree.node(child).deep_value == best)
            .collect();
        if keep.iter().any(|&k| !k) {
            tree.retain_children(id, |idx| keep[idx]);
        }
    }

    let kept = tree.node(id).children.clone();
    let values: Vec<i32> = kept.iter().map(|&c| tree.node(c).deep_value).collect();
    let deep_value = if owned {
        extremal(&values, maximizer)
    } else {
        aggregate_opponent(&values, maximizer, config)
    };

    let mut sequence = 0;
    if deep_value.abs() == WIN_VALUE {
        let shortest = kept
            .iter()
            .map(|&c| tree.node(c).sequence)
            .filter(|&s| s > 0)
            .min();
        if let Some(shortest) = shortest {
            sequence = shortest + 1;
        }
    }

    let node = tree.node_mut(id);
    node.forced = forced;
    node.opportunity = opportunity;
    node.deep_value = deep_value;
    node.sequence = sequence;
}

fn extremal(values: &[i32], toward: Color) -> i32 {
    let mut best = values[0];
    for &value in &values[1..] {
        if better(value, best, toward) {
            best = value;
        }
    }
    best
}

/// Aggregate an opponent-owned node.
///
/// With the pessimistic scenario on, children are averaged as an
/// expectation over opponent replies, except that wins for the
/// maximizer are excluded (a bonus the opponent will not volunteer) and
/// any loss for the maximizer collapses the whole node to worst-case.
/// With it off, plain minimax throughout.
fn aggregate_opponent(values: &[i32], maximizer: Color, config: &SearchConfig) -> i32 {
    let opponent = maximizer.opponent();
    if !config.pessimistic {
        return extremal(values, opponent);
    }

    let loss = win_score(opponent);
    if values.contains(&loss) {
        return extremal(values, opponent);
    }

    let win = win_score(maximizer);
    let rest: Vec<i64> = values
        .iter()
        .filter(|&&v| v != win)
        .map(|&v| i64::from(v))
        .collect();
    if rest.is_empty() {
        // Every reply loses for the opponent.
        return win;
    }
    (rest.iter().sum::<i64>() / rest.len() as i64) as i32
}
