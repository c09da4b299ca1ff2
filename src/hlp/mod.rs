//! The Hex Layer Problem: iterative-deepening search over the hex-layer
//! config family for a chain realizing a requested (possibly partial)
//! 16-lane function.

pub mod solve;

pub use solve::{solve, solve_cancellable, solve_outcome, solve_with_cache_size, SolveOutcome};
