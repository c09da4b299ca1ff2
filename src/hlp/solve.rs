//! HLP iterative-deepening DFS: the hex-layer family's main search,
//! combining the distance-check filters, the transposition cache, and the
//! two-phase reduced/requested-accuracy driver.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::cache::TranspositionCache;
use crate::context::SolverContext;
use crate::dist_check::{self, Accuracy};
use crate::hex::{Config, HexLayerGraph, LayerHandle};
use crate::packed::{Map, LANE_COUNT};
use crate::request::{Request, RequestKind};

/// The largest depth `max_depth` is ever clamped to.
const MAX_CLAMPED_DEPTH: i32 = 31;

/// Upper bound on the number of candidates that can pass the distance
/// check at a single DFS level, preserved here as a `debug_assert!` rather
/// than a hard allocation limit. A group's successor count never gets
/// remotely close to this in practice.
const MAX_CANDIDATES_PER_DEPTH: usize = 800;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolveOutcome {
    Found(i32),
    /// No solution within the requested budget. Carries the
    /// `requested_max_depth + 1` sentinel for callers that want it, but
    /// most callers should just match on this variant.
    Exhausted(i32),
}

/// Returns the chain length on success; if neither the presearch nor the
/// main search finds a chain, returns `requested_max_depth + 1` (using the
/// un-clamped requested depth).
pub fn solve(
    ctx: &SolverContext,
    request: &Request,
    requested_max_depth: i32,
    accuracy: Accuracy,
    out_chain: &mut Vec<u16>,
) -> i32 {
    solve_with_cache_size(ctx, request, requested_max_depth, accuracy, TranspositionCache::DEFAULT_SIZE_LOG, out_chain)
}

/// As [`solve`], but with an explicit transposition-cache slot count
/// (`--cache` on the CLI), rather than [`TranspositionCache::DEFAULT_SIZE_LOG`].
pub fn solve_with_cache_size(
    ctx: &SolverContext,
    request: &Request,
    requested_max_depth: i32,
    accuracy: Accuracy,
    cache_size_log: u32,
    out_chain: &mut Vec<u16>,
) -> i32 {
    solve_cancellable(ctx, request, requested_max_depth, accuracy, cache_size_log, None, out_chain)
}

/// As [`solve_with_cache_size`], but checked once per depth increment
/// against an optional cancel token, so a long-running search started
/// from an interactive front-end can be aborted between iterative-
/// deepening rounds. Returns `requested_max_depth + 1` (the ordinary
/// "exhausted" sentinel) if cancelled before a solution is found.
pub fn solve_cancellable(
    ctx: &SolverContext,
    request: &Request,
    requested_max_depth: i32,
    accuracy: Accuracy,
    cache_size_log: u32,
    cancel: Option<&AtomicBool>,
    out_chain: &mut Vec<u16>,
) -> i32 {
    // Every lane's minimum is 0: any map whatsoever already satisfies this
    // goal, so there's nothing to search for. Config 0x2F0 collapses every
    // lane to zero in a single layer, which trivially satisfies the goal;
    // callers expect a chain of length >= 1, so it stands in for the
    // zero-layer answer.
    if request.mins.0 == 0 {
        out_chain.clear();
        out_chain.push(0x2F0);
        return 1;
    }

    let max_depth = if !(0..=MAX_CLAMPED_DEPTH).contains(&requested_max_depth) {
        MAX_CLAMPED_DEPTH
    } else {
        requested_max_depth
    };

    let unique_outputs = request.min_group();
    let graph = ctx.hex_graph(unique_outputs);

    // A reduced-accuracy presearch is often fast and still frequently
    // optimal, so it runs first to give the "real" search a tighter budget
    // to try to beat.
    let mut reduced_chain = Vec::new();
    let solution_length = single_search(
        graph,
        request,
        max_depth,
        Accuracy::Reduced,
        unique_outputs,
        cache_size_log,
        cancel,
        &mut reduced_chain,
    );

    if accuracy == Accuracy::Reduced {
        out_chain.clear();
        out_chain.extend(reduced_chain);
        return solution_length;
    }

    let mut tighter_chain = Vec::new();
    let result = single_search(
        graph,
        request,
        solution_length - 1,
        accuracy,
        unique_outputs,
        cache_size_log,
        cancel,
        &mut tighter_chain,
    );

    if result > max_depth {
        return requested_max_depth + 1;
    }
    if result <= solution_length - 1 {
        out_chain.clear();
        out_chain.extend(tighter_chain);
        result
    } else {
        // The tighter search didn't beat the presearch; fall back to it.
        out_chain.clear();
        out_chain.extend(reduced_chain);
        solution_length
    }
}

/// A wrapper over [`solve`] that reports the result as a sum type instead
/// of requiring callers to compare against `requested_max_depth` themselves.
pub fn solve_outcome(
    ctx: &SolverContext,
    request: &Request,
    requested_max_depth: i32,
    accuracy: Accuracy,
    out_chain: &mut Vec<u16>,
) -> SolveOutcome {
    let length = solve(ctx, request, requested_max_depth, accuracy, out_chain);
    if length > requested_max_depth {
        SolveOutcome::Exhausted(length)
    } else {
        SolveOutcome::Found(length)
    }
}

/// Iterative deepening at a single accuracy level. Returns the chain
/// length on success, or `max_depth + 1` if no depth up to `max_depth`
/// finds a solution.
fn single_search(
    graph: &HexLayerGraph,
    request: &Request,
    max_depth: i32,
    accuracy: Accuracy,
    unique_outputs: u32,
    cache_size_log: u32,
    cancel: Option<&AtomicBool>,
    out_chain: &mut Vec<u16>,
) -> i32 {
    // If the identity map already satisfies the goal (the request is, in
    // effect, already met with zero real layers), report a one-layer
    // chain using the identity config as a no-op placeholder, rather than
    // an empty chain no caller expects.
    if satisfies(Map::identity(), request) {
        out_chain.clear();
        out_chain.push(Config::IDENTITY.raw());
        return 1;
    }

    let identity = graph.identity();
    let mut cache = TranspositionCache::new(cache_size_log);

    for depth in 1..=max_depth {
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            return max_depth + 1;
        }
        let mut chain = Vec::new();
        if dfs(graph, &mut cache, request, accuracy, unique_outputs, identity, Map::identity(), depth, &mut chain) {
            out_chain.clear();
            out_chain.extend(chain);
            return depth;
        }
        cache.invalidate();
    }
    max_depth + 1
}

fn satisfies(map: Map, request: &Request) -> bool {
    (0..LANE_COUNT).all(|i| {
        let v = map.lane(i);
        request.mins.lane(i) <= v && v <= request.maxs.lane(i)
    })
}

/// DFS at remaining budget `remaining`, current accumulated map `current`,
/// having descended from `layer` in the precomputed successor graph.
/// Successors are visited in descending config order. `chain_from_here`
/// accumulates configs needed from `current` onward; an empty result on
/// success means `current` already satisfies the goal and no further
/// layers are needed.
fn dfs(
    graph: &HexLayerGraph,
    cache: &mut TranspositionCache,
    request: &Request,
    accuracy: Accuracy,
    unique_outputs: u32,
    layer: LayerHandle,
    current: Map,
    remaining: i32,
    chain_from_here: &mut Vec<u16>,
) -> bool {
    debug_assert!(remaining >= 1);

    // Checked unconditionally, not just when out of budget: a DFS path can
    // stumble onto a satisfying state earlier than the depth currently
    // being tried, and that's still a valid (if unplanned) solution.
    if satisfies(current, request) {
        return true;
    }

    if remaining == 1 {
        for succ in graph.successors(layer).rev() {
            let candidate = current.apply(graph.map(succ));
            if satisfies(candidate, request) {
                chain_from_here.push(graph.config(succ).raw());
                return true;
            }
        }
        return false;
    }

    let threshold = dist_check::dist_threshold(accuracy, remaining - 1, unique_outputs);
    let ranged = request.effective_kind() == RequestKind::Ranged;
    let mins_lanes = request.mins.to_lanes();
    let maxs_lanes = request.maxs.to_lanes();

    // Successors surviving the distance check are gathered into a bounded
    // scratch buffer before recursing, rather than recursed into inline.
    let mut candidates: Vec<LayerHandle> = Vec::new();
    for succ in graph.successors(layer).rev() {
        let succ_map = graph.map(succ);
        let candidate_lanes = dist_check::candidate_lanes(current, succ_map);

        let legal = if ranged {
            dist_check::distance_check_ranged(candidate_lanes, mins_lanes, maxs_lanes, threshold)
        } else {
            dist_check::distance_check_partial(candidate_lanes, mins_lanes, threshold)
        };
        if legal {
            candidates.push(succ);
        }
    }
    debug_assert!(candidates.len() <= MAX_CANDIDATES_PER_DEPTH);

    for succ in candidates {
        let candidate = current.apply(graph.map(succ));
        // Encoded so a larger remaining budget maps to a smaller stored
        // value, matching `TranspositionCache::check`'s "smaller proves
        // more" convention.
        if cache.check(candidate, (99 - remaining) as u8) {
            continue;
        }

        let mut tail = Vec::new();
        if dfs(graph, cache, request, accuracy, unique_outputs, succ, candidate, remaining - 1, &mut tail) {
            chain_from_here.push(graph.config(succ).raw());
            chain_from_here.extend(tail);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;

    #[test]
    fn identity_request_solves_in_one_no_op_layer() {
        let ctx = SolverContext::new();
        let request = Request::parse(Some("0123456789ABCDEF")).unwrap();
        let mut chain = Vec::new();
        let length = solve(&ctx, &request, 8, Accuracy::Normal, &mut chain);
        assert_eq!(length, 1);
        assert_eq!(chain, vec![Config::IDENTITY.raw()]);
    }

    #[test]
    fn empty_minimum_goal_short_circuits_to_one_layer() {
        let ctx = SolverContext::new();
        let request = Request::parse(Some("XXXXXXXXXXXXXXXX")).unwrap();
        let mut chain = Vec::new();
        let length = solve(&ctx, &request, 8, Accuracy::Normal, &mut chain);
        assert_eq!(length, 1);
        assert_eq!(chain, vec![0x2F0]);
    }

    #[test]
    fn a_solvable_partial_goal_is_found_within_budget() {
        let ctx = SolverContext::new();
        // Collapses to a two-value group; low group, trivially reachable
        // in very few layers. A nonzero trailing lane avoids the
        // `mins == 0` short circuit so this exercises the real search.
        let request = Request::parse(Some("0000000000000001")).unwrap();
        let mut chain = Vec::new();
        let length = solve(&ctx, &request, 8, Accuracy::Normal, &mut chain);
        assert!(length <= 8);
        assert_eq!(chain.len(), length as usize);
    }

    #[test]
    fn reduced_accuracy_returns_only_the_presearch_result() {
        let ctx = SolverContext::new();
        let request = Request::parse(Some("0000000000000001")).unwrap();
        let mut chain = Vec::new();
        let length = solve(&ctx, &request, 8, Accuracy::Reduced, &mut chain);
        assert_eq!(chain.len(), length as usize);
    }

    #[test]
    fn exhausted_outcome_is_reported_when_budget_is_too_small() {
        let ctx = SolverContext::new();
        let request = Request::parse(Some("0000000000000001")).unwrap();
        let mut chain = Vec::new();
        let outcome = solve_outcome(&ctx, &request, 0, Accuracy::Normal, &mut chain);
        assert!(matches!(outcome, SolveOutcome::Exhausted(_)));
    }
}
