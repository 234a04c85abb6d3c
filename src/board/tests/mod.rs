//! Cross-module board tests.
//!
//! - `proptest.rs` - property-based tests over random game walks
