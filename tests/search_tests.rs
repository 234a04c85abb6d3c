//! Search tests to verify the engine's choices and the tree lifecycle.

use antichess_engine::search::DepthInfo;
use antichess_engine::{find_best_move, Position, SearchConfig};

fn quiet_config() -> SearchConfig {
    SearchConfig {
        randomize: false,
        ..SearchConfig::default()
    }
}

/// Test that a mandated capture chain restricts the engine's choice
#[test]
fn engine_plays_the_mandated_capture() {
    let position = Position::try_from_notation("8/7p/8/8/8/b7/1P6/1N6 w - -").unwrap();
    let result = find_best_move(&position, &quiet_config(), None);

    let chosen = result.best.expect("white has legal moves");
    assert_eq!(chosen.to().to_string(), "a3", "the bishop capture is mandatory");
}

/// Test that a position with no legal moves reports no move and a won
/// valuation
#[test]
fn no_move_position_reports_the_win() {
    let position = Position::try_from_notation("k7/8/8/8/8/8/8/8 w - -").unwrap();
    let result = find_best_move(&position, &quiet_config(), None);
    assert!(result.best.is_none(), "a side with no move has already won");
    assert!(result.valuation > 0, "the valuation must favor white");
}

/// Test that the chosen move is always drawn from the legal set
#[test]
fn engine_move_is_always_legal() {
    let positions = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - -",
        "1r6/4npb1/n4k2/7P/P6R/P4K2/2P2P2/2R5 w - -",
        "8/8/8/8/3p4/8/2P5/7N b - -",
    ];
    for notation in positions {
        let position = Position::try_from_notation(notation).unwrap();
        let config = SearchConfig {
            max_depth: 3,
            ..SearchConfig::default()
        };
        let result = find_best_move(&position, &config, None);
        let chosen = result.best.expect("side to move has legal moves");
        assert!(
            position.generate_moves().contains(chosen),
            "{chosen} is not legal in {notation}"
        );
    }
}

/// Test the deterministic deep search on the fixed mate-hunt position:
/// the same seed must reproduce the same move, valuation and node
/// counts.
#[test]
fn deep_search_is_reproducible_under_a_fixed_seed() {
    let position =
        Position::try_from_notation("1r6/4npb1/n4k2/7P/P6R/P4K2/2P2P2/2R5 w - -").unwrap();
    let config = SearchConfig {
        max_depth: 6,
        node_budget: 100_000,
        seed: 0xC0FFEE,
        ..SearchConfig::default()
    };

    let first = find_best_move(&position, &config, None);
    let second = find_best_move(&position, &config, None);

    let chosen = first.best.expect("white has legal moves");
    assert_eq!(Some(chosen), second.best, "same seed, same move");
    assert_eq!(first.valuation, second.valuation);
    assert_eq!(first.depth, second.depth);
    assert_eq!(first.nodes, second.nodes);
    assert!(position.generate_moves().contains(chosen));
}

/// Test that the observability callback reports monotonic depths and
/// does not alter the search
#[test]
fn depth_callback_is_passive() {
    use std::cell::RefCell;

    let position = Position::classical();
    let config = SearchConfig {
        max_depth: 3,
        ..quiet_config()
    };

    let silent = find_best_move(&position, &config, None);

    let depths: RefCell<Vec<u32>> = RefCell::new(Vec::new());
    let callback = |info: &DepthInfo| depths.borrow_mut().push(info.depth);
    let observed = find_best_move(&position, &config, Some(&callback));

    assert_eq!(silent.best, observed.best);
    assert_eq!(silent.valuation, observed.valuation);
    let depths = depths.into_inner();
    assert!(!depths.is_empty());
    assert!(depths.windows(2).all(|w| w[0] < w[1]), "depths must increase");
}

/// Test tree release completeness: after releasing the root, a
/// reachability scan finds only the root
#[test]
fn released_tree_keeps_only_the_root() {
    let position = Position::classical();
    let config = SearchConfig {
        max_depth: 2,
        ..quiet_config()
    };
    let mut result = find_best_move(&position, &config, None);
    assert!(result.tree.reachable_count() > 1);

    let root = result.tree.root();
    result.tree.release(root);
    assert_eq!(result.tree.reachable_count(), 1);
    assert_eq!(result.tree.live_count(), 1);

    // Releasing an already-leaf root is a no-op.
    result.tree.release(root);
    assert_eq!(result.tree.reachable_count(), 1);
}

/// Test that level presets all produce playable engines
#[test]
fn every_level_produces_a_legal_move() {
    let position = Position::classical();
    for level in 1..=12 {
        let config = SearchConfig {
            seed: u64::from(level),
            ..SearchConfig::from_level(level)
        };
        let result = find_best_move(&position, &config, None);
        let chosen = result.best.expect("the starting position has moves");
        assert!(
            position.generate_moves().contains(chosen),
            "level {level} played an illegal move"
        );
    }
}

/// Test the oyster level: random but reproducible and legal
#[test]
fn oyster_is_random_but_reproducible() {
    let position = Position::classical();
    let config = SearchConfig {
        seed: 77,
        ..SearchConfig::from_level(1)
    };
    let first = find_best_move(&position, &config, None);
    let second = find_best_move(&position, &config, None);
    assert_eq!(first.best, second.best);
    assert_eq!(first.depth, 0, "the oyster does not search");
    assert!(position.generate_moves().contains(first.best.unwrap()));
}
