//! Iterative-deepening driver.
//!
//! The tree is (re)expanded depth by depth. After each depth the node
//! counts observed so far are fitted to an exponential growth model
//! `nodes(d) = a * e^(b*d)` by least squares over the logarithms, and
//! the projection for the next depth decides whether deepening
//! continues. Branching varies sharply with mandatory-capture chains,
//! so a fixed depth would both starve quiet positions and explode in
//! tactical ones.

use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Color, Move, Position};

use super::config::SearchConfig;
use super::pruning;
use super::select::select_move;
use super::tree::{NodeId, SearchTree};
use super::valuation::{backpropagate, win_score};

/// Per-depth observability snapshot passed to the progress callback.
/// Observers must not influence the search result.
#[derive(Clone, Debug)]
pub struct DepthInfo {
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Progress callback invoked after each completed depth.
pub type DepthCallback<'a> = &'a dyn Fn(&DepthInfo);

/// Outcome of one search. The tree is handed back to the caller, who
/// owns it for the duration of the decision and must release it before
/// the next search.
pub struct SearchResult {
    /// The chosen move, or `None` when the side to move has no legal
    /// move (and has therefore already won)
    pub best: Option<Move>,
    /// Deep valuation of the root after scoring
    pub valuation: i32,
    /// Deepest completed ply count
    pub depth: u32,
    /// Node count of the last completed depth
    pub nodes: u64,
    pub tree: SearchTree,
}

/// Run a full search for the side to move and pick one move.
#[must_use]
pub fn find_best_move(
    position: &Position,
    config: &SearchConfig,
    callback: Option<DepthCallback<'_>>,
) -> SearchResult {
    let start = Instant::now();
    let maximizer = position.side_to_move();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tree = SearchTree::new(position.clone(), config, &mut rng);
    let root = tree.root();

    let candidates = tree.node(root).moves.len();
    if candidates == 0 {
        return SearchResult {
            best: None,
            valuation: win_score(maximizer),
            depth: 0,
            nodes: 1,
            tree,
        };
    }

    // A forced move needs no scoring; this shortcut changes timing,
    // never legality.
    if candidates == 1 && config.skip_forced_move {
        let mv = tree.node(root).moves[0];
        let valuation = tree.node(root).static_value;
        return SearchResult {
            best: Some(mv),
            valuation,
            depth: 0,
            nodes: 1,
            tree,
        };
    }

    if config.oyster {
        let mv = tree.node(root).moves[rng.gen_range(0..candidates)];
        let valuation = tree.node(root).static_value;
        return SearchResult {
            best: Some(mv),
            valuation,
            depth: 0,
            nodes: 1,
            tree,
        };
    }

    let mut samples: Vec<(u32, u64)> = Vec::new();
    let mut depth_reached = 0;
    let mut total_nodes = 0;
    // Selection needs an expanded root, so at least one ply is searched
    // whatever the configured ceiling.
    let max_depth = config.max_depth.max(1);
    for depth in 1..=max_depth {
        let nodes = expand_to_depth(&mut tree, root, depth, maximizer, config, &mut rng);
        depth_reached = depth;
        total_nodes = nodes;
        samples.push((depth, nodes));
        debug!("depth {depth} complete: {nodes} nodes");
        if let Some(cb) = callback {
            cb(&DepthInfo {
                depth,
                nodes,
                elapsed: start.elapsed(),
            });
        }

        if depth == max_depth {
            break;
        }
        if config.whole_budget {
            if nodes >= config.node_budget {
                break;
            }
        } else if let Some(projected) = project_nodes(&samples, depth + 1) {
            trace!("projected nodes for depth {}: {projected:.0}", depth + 1);
            if projected > config.node_budget as f64 {
                break;
            }
        }
    }

    backpropagate(&mut tree, root, maximizer, config);
    let best = select_move(&tree, maximizer, config, &mut rng);
    let valuation = tree.node(root).deep_value;
    SearchResult {
        best: Some(best),
        valuation,
        depth: depth_reached,
        nodes: total_nodes,
        tree,
    }
}

/// Expand and prune the subtree under `id` to `depth` plies, returning
/// the node count of the pruned subtree. Children are created once and
/// cached; pruning runs before counting, so discarded branches never
/// reach the budget.
fn expand_to_depth(
    tree: &mut SearchTree,
    id: NodeId,
    depth: u32,
    maximizer: Color,
    config: &SearchConfig,
    rng: &mut StdRng,
) -> u64 {
    if depth == 0 || tree.node(id).moves.is_empty() {
        return 1;
    }

    if !tree.node(id).expanded {
        let owned = tree.node(id).position.side_to_move() == maximizer;
        if owned {
            pruning::apply_handicap(tree, id, config, rng);
        }
        tree.expand(id, config, rng);
        if owned && config.minimize_liberty {
            pruning::minimize_liberty(tree, id, config);
        }
    }

    let children = tree.node(id).children.clone();
    let mut count = 1;
    for child in children {
        count += expand_to_depth(tree, child, depth - 1, maximizer, config, rng);
    }
    count
}

/// Least-squares fit of `ln(nodes)` against depth, projecting the node
/// count at `next_depth`. Needs at least two completed depths.
fn project_nodes(samples: &[(u32, u64)], next_depth: u32) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let n = samples.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_xy = 0.0;
    for &(depth, nodes) in samples {
        let x = f64::from(depth);
        let y = (nodes as f64).max(1.0).ln();
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }
    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return None;
    }
    let b = (n * sum_xy - sum_x * sum_y) / denom;
    let a = (sum_y - b * sum_x) / n;
    Some((a + b * f64::from(next_depth)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig {
            randomize: false,
            handicap_percent: 0,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn no_moves_reports_the_win() {
        let position = Position::try_from_notation("k7/8/8/8/8/8/8/8 w - -").unwrap();
        let result = find_best_move(&position, &config(), None);
        assert!(result.best.is_none());
        assert_eq!(result.valuation, win_score(Color::White));
    }

    #[test]
    fn single_move_shortcut_skips_the_search() {
        // White's only legal move is the mandated capture.
        let position = Position::try_from_notation("7k/8/8/8/8/2p5/8/1N6 w - -").unwrap();
        let result = find_best_move(&position, &config(), None);
        assert_eq!(result.depth, 0);
        assert_eq!(result.best.unwrap().to_string(), "b1c3");
    }

    #[test]
    fn single_move_is_searched_when_shortcut_is_off() {
        let position = Position::try_from_notation("7k/8/8/8/8/2p5/8/1N6 w - -").unwrap();
        let cfg = SearchConfig {
            skip_forced_move: false,
            max_depth: 2,
            ..config()
        };
        let result = find_best_move(&position, &cfg, None);
        assert!(result.depth >= 1);
        assert_eq!(result.best.unwrap().to_string(), "b1c3");
    }

    #[test]
    fn oyster_plays_a_legal_move_without_searching() {
        let position = Position::classical();
        let cfg = SearchConfig {
            oyster: true,
            seed: 9,
            ..config()
        };
        let result = find_best_move(&position, &cfg, None);
        assert_eq!(result.depth, 0);
        let mv = result.best.unwrap();
        assert!(position.generate_moves().contains(mv));

        // Same seed, same pick.
        let again = find_best_move(&position, &cfg, None);
        assert_eq!(again.best, result.best);
    }

    #[test]
    fn callback_sees_every_completed_depth() {
        use std::cell::RefCell;
        let position = Position::classical();
        let cfg = SearchConfig {
            max_depth: 3,
            node_budget: u64::MAX,
            ..config()
        };
        let depths = RefCell::new(Vec::new());
        let cb = |info: &DepthInfo| depths.borrow_mut().push((info.depth, info.nodes));
        let result = find_best_move(&position, &cfg, Some(&cb));
        let seen = depths.into_inner();
        assert_eq!(
            seen.iter().map(|(d, _)| *d).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(seen.last().unwrap().1, result.nodes);
        assert!(result.best.is_some());
    }

    #[test]
    fn callback_does_not_change_the_choice() {
        let position = Position::classical();
        let cfg = SearchConfig {
            max_depth: 3,
            ..config()
        };
        let silent = find_best_move(&position, &cfg, None);
        let noisy_cb = |_: &DepthInfo| {};
        let noisy = find_best_move(&position, &cfg, Some(&noisy_cb));
        assert_eq!(silent.best, noisy.best);
        assert_eq!(silent.valuation, noisy.valuation);
    }

    #[test]
    fn node_budget_stops_deepening() {
        let position = Position::classical();
        let cfg = SearchConfig {
            max_depth: 10,
            node_budget: 50,
            ..config()
        };
        let result = find_best_move(&position, &cfg, None);
        assert!(result.depth < 10, "a 50-node budget cannot reach depth 10");
        assert!(result.best.is_some());
    }

    #[test]
    fn whole_budget_mode_stops_only_once_met() {
        let position = Position::classical();
        let cfg = SearchConfig {
            max_depth: 4,
            node_budget: 30,
            whole_budget: true,
            ..config()
        };
        let result = find_best_move(&position, &cfg, None);
        // Depth 1 yields 21 nodes (< 30), so depth 2 must still run.
        assert!(result.depth >= 2);
        assert!(result.nodes >= 30);
    }

    #[test]
    fn growth_projection_needs_two_samples() {
        assert_eq!(project_nodes(&[(1, 10)], 2), None);
        let projected = project_nodes(&[(1, 10), (2, 100)], 3).unwrap();
        // Perfect tenfold growth projects to ~1000.
        assert!((projected - 1000.0).abs() < 1.0, "got {projected}");
    }

    #[test]
    fn growth_projection_handles_flat_counts() {
        let projected = project_nodes(&[(1, 50), (2, 50)], 3).unwrap();
        assert!((projected - 50.0).abs() < 1.0, "got {projected}");
    }

    #[test]
    fn search_is_reproducible_under_a_fixed_seed() {
        let position = Position::classical();
        let cfg = SearchConfig {
            randomize: true,
            seed: 1234,
            max_depth: 3,
            ..SearchConfig::default()
        };
        let first = find_best_move(&position, &cfg, None);
        let second = find_best_move(&position, &cfg, None);
        assert_eq!(first.best, second.best);
        assert_eq!(first.valuation, second.valuation);
        assert_eq!(first.nodes, second.nodes);
    }
}
