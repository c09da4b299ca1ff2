//! The 2bin/dbin variant: a sibling problem over 16-bit ones/zeros masks,
//! solved with a pattern database and a sorted terminal-layer table
//! instead of the hex variant's pure distance-check filters.

pub mod finish;
pub mod layer;
pub mod map;
pub mod prune;
pub mod solve;

pub use finish::{DbinFinishTable, PrecomputedDbinFinish};
pub use layer::{dbin_layer, DbinConfig, DBIN_CONFIG_COUNT};
pub use map::DbinMap;
pub use prune::PruneTable;
pub use solve::{solve, solve_cancellable, solve_exact, solve_with_cache_size, DbinContext, SolveOutcome};
