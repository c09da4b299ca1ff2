//! Per-group precomputed hex successor graph: unique representative layers
//! plus adjacency/LUT arrays shaped for batched DFS.

use crate::hex::layer::{hex_layer, Config, CONFIG_COUNT};
use crate::hex::unique_set::UniqueMapSet;
use crate::packed::Map;

/// SIMD loads of the successor LUT read this many maps at once; each
/// layer's LUT slice is zero-padded up to a multiple of this so a batched
/// load never reads a foreign layer's data.
pub const LUT_BATCH: usize = 4;

/// A single precomputed layer: its config, its map (relative to identity),
/// and where its successor data lives in the enclosing graph's arenas.
#[derive(Clone, Copy, Debug)]
pub struct LayerHandle(pub(crate) u32);

pub struct HexLayerGraph {
    target_group: u32,
    configs: Vec<u16>,
    maps: Vec<Map>,
    succ_start: Vec<u32>,
    succ_count: Vec<u32>,
    lut_start: Vec<u32>,
    /// Flat, *unpadded* successor indices (into `configs`/`maps`).
    successor_indices: Vec<u32>,
    /// Flat, zero-padded (to a multiple of [`LUT_BATCH`]) successor maps.
    successor_luts: Vec<u64>,
}

impl LayerHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl HexLayerGraph {
    pub fn identity(&self) -> LayerHandle {
        LayerHandle(0)
    }

    pub fn target_group(&self) -> u32 {
        self.target_group
    }

    pub fn config(&self, h: LayerHandle) -> Config {
        Config(self.configs[h.0 as usize])
    }

    pub fn map(&self, h: LayerHandle) -> Map {
        self.maps[h.0 as usize]
    }

    pub fn successor_count(&self, h: LayerHandle) -> usize {
        self.succ_count[h.0 as usize] as usize
    }

    /// Successor layer handles, ascending by config (the order they were
    /// discovered during precompute, which is ascending in both outer and
    /// inner config loops).
    pub fn successors(&self, h: LayerHandle) -> impl Iterator<Item = LayerHandle> + '_ {
        let i = h.0 as usize;
        let start = self.succ_start[i] as usize;
        let count = self.succ_count[i] as usize;
        self.successor_indices[start..start + count]
            .iter()
            .map(|&idx| LayerHandle(idx))
    }

    pub fn successor_handle(&self, h: LayerHandle, i: usize) -> LayerHandle {
        let start = self.succ_start[h.0 as usize] as usize;
        LayerHandle(self.successor_indices[start + i])
    }

    /// Zero-padded LUT of successor maps, length a multiple of [`LUT_BATCH`].
    pub fn successor_luts(&self, h: LayerHandle) -> &[u64] {
        let i = h.0 as usize;
        let count = self.succ_count[i] as usize;
        let padded = round_up(count, LUT_BATCH);
        let start = self.lut_start[i] as usize;
        &self.successor_luts[start..start + padded]
    }

    pub fn layer_count(&self) -> usize {
        self.configs.len()
    }
}

fn round_up(n: usize, factor: usize) -> usize {
    if n == 0 {
        0
    } else {
        ((n - 1) / factor + 1) * factor
    }
}

/// Build the hex successor graph for `target_group` deterministically.
///
/// Iteration order over configs and successors is ascending, so the same
/// group always produces the same tables.
pub fn precompute_hex_layers(target_group: u32) -> HexLayerGraph {
    debug_assert!((1..=16).contains(&target_group));

    let identity = Map::identity();
    let mut seen = UniqueMapSet::new();
    seen.insert(identity);

    let mut configs = vec![0u16];
    let mut maps = vec![identity];

    for raw in 0..CONFIG_COUNT {
        let m = hex_layer(identity, Config(raw));
        if m.group() < target_group {
            continue;
        }
        if seen.contains(m) {
            continue;
        }
        seen.insert(m);
        configs.push(raw);
        maps.push(m);
    }

    let layer_count = configs.len();
    let mut successors_per_layer: Vec<Vec<u32>> = vec![Vec::new(); layer_count];

    for i in 0..layer_count {
        for j in 1..layer_count {
            if i == 0 {
                // Identity accepts every non-identity layer unconditionally;
                // all are already unique by the pass above.
                successors_per_layer[0].push(j as u32);
                continue;
            }
            let out = maps[i].apply(maps[j]);
            if out.group() < target_group {
                continue;
            }
            if seen.contains(out) {
                continue;
            }
            seen.insert(out);
            successors_per_layer[i].push(j as u32);
        }
    }

    let mut succ_start = vec![0u32; layer_count];
    let mut succ_count = vec![0u32; layer_count];
    let mut lut_start = vec![0u32; layer_count];
    let mut successor_indices = Vec::new();
    let mut successor_luts = Vec::new();

    for i in 0..layer_count {
        succ_start[i] = successor_indices.len() as u32;
        lut_start[i] = successor_luts.len() as u32;
        let succs = &successors_per_layer[i];
        succ_count[i] = succs.len() as u32;
        for &j in succs {
            successor_indices.push(j);
            successor_luts.push(maps[j as usize].0);
        }
        let pad = round_up(succs.len(), LUT_BATCH) - succs.len();
        successor_luts.extend(std::iter::repeat(0u64).take(pad));
    }

    HexLayerGraph {
        target_group,
        configs,
        maps,
        succ_start,
        succ_count,
        lut_start,
        successor_indices,
        successor_luts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_layer_has_config_zero_and_identity_map() {
        let graph = precompute_hex_layers(16);
        let id = graph.identity();
        assert_eq!(graph.config(id), Config::IDENTITY);
        assert_eq!(graph.map(id), Map::identity());
    }

    #[test]
    fn all_successor_maps_meet_target_group() {
        let graph = precompute_hex_layers(15);
        for i in 0..graph.layer_count() {
            let h = LayerHandle(i as u32);
            for succ in graph.successors(h) {
                assert!(graph.map(succ).group() >= 15);
            }
        }
    }

    #[test]
    fn successor_luts_are_padded_to_batch_multiple() {
        let graph = precompute_hex_layers(16);
        let id = graph.identity();
        let luts = graph.successor_luts(id);
        assert_eq!(luts.len() % LUT_BATCH, 0);
        assert!(luts.len() >= graph.successor_count(id));
    }

    #[test]
    fn successor_luts_match_successor_maps() {
        let graph = precompute_hex_layers(16);
        let id = graph.identity();
        let luts = graph.successor_luts(id);
        for (i, succ) in graph.successors(id).enumerate() {
            assert_eq!(luts[i], graph.map(succ).0);
        }
    }

    #[test]
    fn precompute_is_deterministic() {
        let a = precompute_hex_layers(14);
        let b = precompute_hex_layers(14);
        assert_eq!(a.configs, b.configs);
        assert_eq!(a.maps, b.maps);
        assert_eq!(a.successor_indices, b.successor_indices);
    }

    #[test]
    fn identity_successors_include_every_other_layer() {
        let graph = precompute_hex_layers(16);
        let id = graph.identity();
        assert_eq!(graph.successor_count(id), graph.layer_count() - 1);
    }
}
