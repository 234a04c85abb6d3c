//! Game-tree search under forced-capture semantics.
//!
//! The driver expands a lazily built tree depth by depth, prunes it
//! with the configured heuristics, scores it by post-order
//! backpropagation, and picks one move. The search is single-threaded
//! and synchronous; the only cancellation point is between depths, via
//! the node-budget rules.

mod config;
mod deepening;
mod pruning;
mod select;
mod tree;
mod valuation;

pub use config::{PieceValues, SearchConfig};
pub use deepening::{find_best_move, DepthCallback, DepthInfo, SearchResult};
pub use tree::{NodeId, Opportunity, SearchTree};
pub use valuation::WIN_VALUE;
