//! 2bin DFS: iterative deepening combining the transposition cache, the
//! prune table, and the terminal-layer table to find optimal dbin chains.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::cache::TranspositionCache;
use crate::dbin::finish::DbinFinishTable;
use crate::dbin::map::DbinMap;
use crate::dbin::prune::PruneTable;
use crate::hex::{HexLayerGraph, LayerHandle};

pub struct DbinContext {
    pub graph: HexLayerGraph,
    pub prune: PruneTable,
    pub finish: DbinFinishTable,
}

impl DbinContext {
    pub fn for_group(group: u32) -> Self {
        let graph = crate::hex::precompute_hex_layers(group);
        let prune = PruneTable::build(&graph, group);
        let finish = DbinFinishTable::build(&graph);
        DbinContext { graph, prune, finish }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolveOutcome {
    Found(i32),
    /// No solution within `max_depth`, reported via the asymmetric
    /// sentinel below (`max_depth - 1`, not `max_depth + 1`).
    Exhausted,
}

/// Returns the chain length on success; on failure returns
/// `max_depth - 1` (including for `max_depth == 0`, giving `-1`), and
/// `out_chain` is left untouched.
pub fn solve(ctx: &DbinContext, goal: DbinMap, max_depth: i32, out_chain: &mut Vec<u16>) -> i32 {
    solve_with_cache_size(ctx, goal, max_depth, TranspositionCache::DEFAULT_SIZE_LOG, out_chain)
}

/// As [`solve`], but with an explicit transposition-cache slot count
/// (`--cache` on the CLI), rather than [`TranspositionCache::DEFAULT_SIZE_LOG`].
pub fn solve_with_cache_size(
    ctx: &DbinContext,
    goal: DbinMap,
    max_depth: i32,
    cache_size_log: u32,
    out_chain: &mut Vec<u16>,
) -> i32 {
    solve_cancellable(ctx, goal, max_depth, cache_size_log, None, out_chain)
}

/// As [`solve_with_cache_size`], but checked once per depth increment
/// against an optional cancel token.
pub fn solve_cancellable(
    ctx: &DbinContext,
    goal: DbinMap,
    max_depth: i32,
    cache_size_log: u32,
    cancel: Option<&AtomicBool>,
    out_chain: &mut Vec<u16>,
) -> i32 {
    if max_depth < 0 {
        return max_depth - 1;
    }

    let mut cache = TranspositionCache::new(cache_size_log);
    let identity = ctx.graph.identity();

    for depth in 0..max_depth {
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            return max_depth - 1;
        }
        let mut scratch = Vec::new();
        if dfs(ctx, &mut cache, identity, goal, depth, &mut scratch) {
            out_chain.clear();
            out_chain.extend(scratch);
            return depth + 1;
        }
        cache.invalidate();
    }
    max_depth - 1
}

pub fn solve_exact(ctx: &DbinContext, exact: u16, max_depth: i32, out_chain: &mut Vec<u16>) -> i32 {
    solve(ctx, DbinMap::from_exact(exact), max_depth, out_chain)
}

/// A wrapper over [`solve`] that reports the result as the sum type
/// `DESIGN NOTES` calls for, instead of requiring callers to know the
/// sentinel arithmetic.
pub fn solve_outcome(ctx: &DbinContext, goal: DbinMap, max_depth: i32, out_chain: &mut Vec<u16>) -> SolveOutcome {
    let length = solve(ctx, goal, max_depth, out_chain);
    if length == max_depth - 1 {
        SolveOutcome::Exhausted
    } else {
        SolveOutcome::Found(length)
    }
}

fn dfs(
    ctx: &DbinContext,
    cache: &mut TranspositionCache,
    layer: LayerHandle,
    remaining: DbinMap,
    remaining_depth: i32,
    chain_from_here: &mut Vec<u16>,
) -> bool {
    if remaining_depth < 3 {
        if let Some(finish) = ctx.finish.find(remaining.ones, remaining.zeros) {
            let mut emitted = Vec::new();
            finish.emit_into(&mut emitted);
            chain_from_here.extend(emitted);
            return true;
        }
        return false;
    }

    for succ in ctx.graph.successors(layer) {
        let next_remaining = remaining.prepend(ctx.graph.map(succ));
        if next_remaining.is_contradictory() {
            continue;
        }
        if ctx.prune.distance(next_remaining.zeros, next_remaining.ones) as i32 > remaining_depth {
            continue;
        }

        let cache_key = crate::packed::Map(next_remaining.as_packed() as u64);
        if cache.check(cache_key, (99 - remaining_depth) as u8) {
            continue;
        }

        let mut tail = Vec::new();
        if dfs(ctx, cache, succ, next_remaining, remaining_depth - 1, &mut tail) {
            chain_from_here.push(ctx.graph.config(succ).raw());
            chain_from_here.extend(tail);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_identity_goal_solves_in_one_layer() {
        let ctx = DbinContext::for_group(16);
        let mut chain = Vec::new();
        let length = solve_exact(&ctx, 0xFFFF, 8, &mut chain);
        assert!(length >= 1);
        assert!(!chain.is_empty());
    }

    #[test]
    fn negative_max_depth_returns_sentinel_without_touching_chain() {
        let ctx = DbinContext::for_group(16);
        let mut chain = vec![0xBEEFu16];
        let length = solve_exact(&ctx, 0xFFFF, -5, &mut chain);
        assert_eq!(length, -6);
        assert_eq!(chain, vec![0xBEEFu16]);
    }
}
