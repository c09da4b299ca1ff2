//! Pattern database (2bin prune table): a ternary-indexed 3¹⁶-entry
//! admissible distance heuristic, built once per group by BFS over the
//! hex successor graph and then projected onto the ternary index space.

use std::sync::OnceLock;

use crate::dbin::map::exact_prepend;
use crate::hex::{HexLayerGraph, LayerHandle};

const PRUNE_ENTRIES: usize = 43_046_721; // 3^16
const INFINITY_DIST: u8 = 15;
const MAX_BFS_DISTANCE: u8 = 12;

const LO_HALVES_1_64: u64 = 0x5555_5555_5555_5555;
const HI_HALVES_1_64: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// Binary-coded-ternary increment: add 1 to `x` read as a base-3 number
/// packed two bits per trit.
fn bct_inc(x: u64) -> u64 {
    let x = x.wrapping_add(LO_HALVES_1_64 + 1);
    x.wrapping_sub(((x >> 1) | x) & LO_HALVES_1_64)
}

fn bct_any_twos(x: u64) -> u64 {
    x & HI_HALVES_1_64
}

fn bct_lowest_two(x: u64) -> u32 {
    (x & HI_HALVES_1_64).trailing_zeros() / 2
}

fn powers_of_3() -> &'static [u64; 16] {
    static TABLE: OnceLock<[u64; 16]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut out = [1u64; 16];
        for i in 1..16 {
            out[i] = out[i - 1] * 3;
        }
        out
    })
}

fn bct_value_for_byte(byte: u8) -> u32 {
    let mut value = 0u32;
    let mut power = 1u32;
    for bit in 0..8 {
        if (byte >> bit) & 1 != 0 {
            value += power;
        }
        power *= 3;
    }
    value
}

fn bct_low_table() -> &'static [u32; 256] {
    static TABLE: OnceLock<[u32; 256]> = OnceLock::new();
    TABLE.get_or_init(|| std::array::from_fn(|i| bct_value_for_byte(i as u8)))
}

fn bct_high_table() -> &'static [u32; 256] {
    static TABLE: OnceLock<[u32; 256]> = OnceLock::new();
    TABLE.get_or_init(|| std::array::from_fn(|i| bct_value_for_byte(i as u8) * 81 * 81))
}

/// Each of the 16 bit positions contributes a trit: 0 if in `zeros`, 1 if
/// in `ones`, 2 if in neither (don't-care).
pub fn ternary_index(zeros: u16, ones: u16) -> u32 {
    let twos = !(ones | zeros);
    bct_high_table()[(twos >> 8) as usize] * 2
        + bct_low_table()[(twos & 0xFF) as usize] * 2
        + bct_high_table()[(ones >> 8) as usize]
        + bct_low_table()[(ones & 0xFF) as usize]
}

pub struct PruneTable {
    values: Vec<u8>,
}

impl PruneTable {
    /// Admissible lower bound on the number of remaining layers needed to
    /// realize an exact pattern consistent with `(zeros, ones)`.
    pub fn distance(&self, zeros: u16, ones: u16) -> u8 {
        self.values[ternary_index(zeros, ones) as usize]
    }

    pub fn build(graph: &HexLayerGraph, group: u32) -> Self {
        let mut pretable: Vec<i32> = vec![-1; 1 << 16];

        // Seed distance 0: every mask whose binary form is /1*0*1*/.
        for i in 0..=16i32 {
            let high_part = -1i32 << i;
            for j in 0..i {
                let idx = (0xFFFFi32 & (high_part | !(-1i32 << j))) as usize;
                pretable[idx] = 0;
            }
        }

        if group > 2 {
            pretable[0] = i32::from(INFINITY_DIST);
            pretable[0xFFFF] = i32::from(INFINITY_DIST);
        }
        if group == 4 {
            for i in 0..16u32 {
                pretable[(1u32 << i) as usize] = i32::from(INFINITY_DIST);
                pretable[(0xFFFFu32 & !(1u32 << i)) as usize] = i32::from(INFINITY_DIST);
            }
        }

        let mut search_distance: u8 = 0;
        loop {
            let frontier: Vec<usize> = (0..pretable.len())
                .filter(|&m| pretable[m] >= 0 && (pretable[m] & 0xF) as u8 == search_distance)
                .collect();
            if frontier.is_empty() {
                break;
            }
            for map in frontier {
                let layer_index = (pretable[map] >> 4) as u32;
                let handle = LayerHandle(layer_index);
                for succ in graph.successors(handle) {
                    let next_map = exact_prepend(graph.map(succ), map as u16) as usize;
                    if pretable[next_map] >= 0 {
                        continue;
                    }
                    let succ_index = succ.index();
                    pretable[next_map] = ((succ_index as i32) << 4) | i32::from(search_distance + 1);
                }
            }
            if search_distance >= MAX_BFS_DISTANCE {
                break;
            }
            search_distance += 1;
        }

        let mut values = vec![0u8; PRUNE_ENTRIES];
        let powers = powers_of_3();
        let mut next_pretable_idx = 0usize;
        let mut bct_index: u64 = 0;
        for index in 0..PRUNE_ENTRIES {
            let value = if bct_any_twos(bct_index) != 0 {
                let offset = powers[bct_lowest_two(bct_index) as usize] as usize;
                let distance0 = values[index - offset * 2];
                let distance1 = values[index - offset];
                distance0.min(distance1)
            } else {
                let raw = pretable.get(next_pretable_idx).copied().unwrap_or(i32::from(INFINITY_DIST));
                next_pretable_idx += 1;
                (raw & 0xF) as u8
            };
            values[index] = value;
            bct_index = bct_inc(bct_index);
        }

        PruneTable { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::precompute_hex_layers;

    #[test]
    fn ternary_index_is_injective_for_sampled_inputs() {
        let mut seen = std::collections::HashSet::new();
        for ones in [0u16, 0xFFFF, 0xAAAA, 0x1234] {
            for zeros in [0u16, 0xFFFF, 0x5555, 0x4321] {
                if ones & zeros != 0 {
                    continue;
                }
                let idx = ternary_index(zeros, ones);
                assert!(idx < PRUNE_ENTRIES as u32);
                seen.insert(idx);
            }
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn fully_determined_legal_patterns_have_finite_distance() {
        let graph = precompute_hex_layers(16);
        let table = PruneTable::build(&graph, 16);
        // all-don't-care should be trivially distance 0 (no constraints).
        let all_dont_care = table.distance(0, 0);
        assert!(all_dont_care <= INFINITY_DIST);
    }
}
