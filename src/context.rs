//! Process-wide shared state: per-group precomputed hex successor graphs
//! and 2bin contexts, built lazily on first use and memoised for the
//! process's lifetime. Allows more than one group to be solved for in the
//! same process without recomputing shared tables.

use std::sync::OnceLock;

use crate::dbin::DbinContext;
use crate::hex::{precompute_hex_layers, HexLayerGraph};

/// Group values range `1..=16`; one lazily-built slot per group.
const GROUP_SLOTS: usize = 16;

pub struct SolverContext {
    hex_tables: [OnceLock<HexLayerGraph>; GROUP_SLOTS],
    dbin_tables: [OnceLock<DbinContext>; GROUP_SLOTS],
}

impl SolverContext {
    pub fn new() -> Self {
        SolverContext {
            hex_tables: std::array::from_fn(|_| OnceLock::new()),
            dbin_tables: std::array::from_fn(|_| OnceLock::new()),
        }
    }

    /// The precomputed hex successor graph for `group`, built on first
    /// request and reused for the rest of the process's lifetime.
    pub fn hex_graph(&self, group: u32) -> &HexLayerGraph {
        debug_assert!((1..=GROUP_SLOTS as u32).contains(&group));
        self.hex_tables[(group - 1) as usize].get_or_init(|| precompute_hex_layers(group))
    }

    /// The 2bin prune table and terminal-finish table for `group`, built
    /// on first request.
    pub fn dbin_context(&self, group: u32) -> &DbinContext {
        debug_assert!((1..=GROUP_SLOTS as u32).contains(&group));
        self.dbin_tables[(group - 1) as usize].get_or_init(|| DbinContext::for_group(group))
    }
}

impl Default for SolverContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_graph_is_memoized_across_calls() {
        let ctx = SolverContext::new();
        let a = ctx.hex_graph(16) as *const HexLayerGraph;
        let b = ctx.hex_graph(16) as *const HexLayerGraph;
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_groups_get_distinct_graphs() {
        let ctx = SolverContext::new();
        assert_ne!(ctx.hex_graph(16).layer_count(), 0);
        assert_ne!(ctx.hex_graph(1).layer_count(), 0);
    }

    #[test]
    fn dbin_context_is_memoized_across_calls() {
        let ctx = SolverContext::new();
        let a = ctx.dbin_context(16) as *const DbinContext;
        let b = ctx.dbin_context(16) as *const DbinContext;
        assert_eq!(a, b);
    }
}
