//! Terminal-layer table: every unique 1-, 2-, or 3-layer ending (a dbin
//! layer, optionally preceded by one or two hex layers) that produces an
//! exact 16-bit pattern from identity, sorted for binary search.

use std::collections::BTreeMap;

use crate::dbin::layer::{dbin_layer, DbinConfig, DBIN_CONFIG_COUNT};
use crate::dbin::map::exact_prepend;
use crate::hex::{HexLayerGraph, LayerHandle};

#[derive(Clone, Copy, Debug)]
pub struct PrecomputedDbinFinish {
    pub map: u16,
    pub dbin_config: u16,
    pub hex_dist1_config: u16,
    pub hex_dist2_config: u16,
}

impl PrecomputedDbinFinish {
    /// Push this ending's configs into `chain`, skipping hex configs that
    /// are zero: a zero hex config means that layer wasn't used, not that
    /// it's the identity layer's real config.
    pub fn emit_into(&self, chain: &mut Vec<u16>) {
        if self.hex_dist2_config != 0 {
            chain.push(self.hex_dist2_config);
        }
        if self.hex_dist1_config != 0 {
            chain.push(self.hex_dist1_config);
        }
        chain.push(self.dbin_config);
    }
}

pub struct DbinFinishTable {
    entries: Vec<PrecomputedDbinFinish>,
}

impl DbinFinishTable {
    pub fn build(graph: &HexLayerGraph) -> Self {
        let mut unique: BTreeMap<u16, PrecomputedDbinFinish> = BTreeMap::new();

        // Distance-0: a single terminal dbin layer applied to identity.
        for raw in 0..DBIN_CONFIG_COUNT {
            let config = DbinConfig(raw);
            let map = dbin_layer(config);
            unique.entry(map).or_insert(PrecomputedDbinFinish {
                map,
                dbin_config: raw,
                hex_dist1_config: 0,
                hex_dist2_config: 0,
            });
        }
        let dist0: Vec<PrecomputedDbinFinish> = unique.values().copied().collect();

        // Distance-1: one hex layer (from identity), then a dbin layer.
        let identity = graph.identity();
        let mut dist1_with_handle: Vec<(PrecomputedDbinFinish, LayerHandle)> = Vec::new();
        for final0 in &dist0 {
            for hex in graph.successors(identity) {
                let hex_config = graph.config(hex).raw();
                let map = exact_prepend(graph.map(hex), final0.map);
                let entry = PrecomputedDbinFinish {
                    map,
                    dbin_config: final0.dbin_config,
                    hex_dist1_config: hex_config,
                    hex_dist2_config: 0,
                };
                if unique.contains_key(&map) {
                    continue;
                }
                unique.insert(map, entry);
                dist1_with_handle.push((entry, hex));
            }
        }

        // Distance-2: two hex layers, then a dbin layer.
        for (final1, first_hex) in &dist1_with_handle {
            for hex in graph.successors(*first_hex) {
                let hex_config = graph.config(hex).raw();
                let map = exact_prepend(graph.map(hex), final1.map);
                let entry = PrecomputedDbinFinish {
                    map,
                    dbin_config: final1.dbin_config,
                    hex_dist1_config: final1.hex_dist1_config,
                    hex_dist2_config: hex_config,
                };
                if unique.contains_key(&map) {
                    continue;
                }
                unique.insert(map, entry);
            }
        }

        DbinFinishTable {
            entries: unique.into_values().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find any entry whose map is a superset of `required_ones` and
    /// disjoint from `required_zeros` (`cmp_dbin_remainder`'s binary
    /// search, ported as-is).
    pub fn find(&self, required_ones: u16, required_zeros: u16) -> Option<&PrecomputedDbinFinish> {
        self.entries
            .binary_search_by(|entry| {
                let missing_ones = required_ones & !entry.map;
                let excess_zeros = required_zeros & entry.map;
                excess_zeros.cmp(&missing_ones)
            })
            .ok()
            .map(|i| &self.entries[i])
    }
}
