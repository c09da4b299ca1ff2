//! The dbin partial-mask type: two 16-bit lane masks (`ones`, `zeros`)
//! saying which lanes are forced to 1, forced to 0, or left don't-care
//! (neither bit set).

use crate::packed::Map;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DbinMap {
    pub ones: u16,
    pub zeros: u16,
}

impl DbinMap {
    pub fn from_exact(bits: u16) -> Self {
        DbinMap {
            ones: bits,
            zeros: !bits,
        }
    }

    /// `true` if some lane is claimed as both forced-0 and forced-1, an
    /// unreachable, contradictory state.
    pub fn is_contradictory(self) -> bool {
        self.ones & self.zeros != 0
    }

    pub fn as_packed(self) -> u32 {
        (self.ones as u32) | ((self.zeros as u32) << 16)
    }

    pub fn from_packed(packed: u32) -> Self {
        DbinMap {
            ones: (packed & 0xFFFF) as u16,
            zeros: (packed >> 16) as u16,
        }
    }

    /// Number of distinct classes among `{forced-0, forced-1}` present in
    /// an *exact* map (`get_dbin_exact_group`): up to 4, since a lane can
    /// independently be 0-or-1 in each of two interleaved 16-bit planes.
    /// Exact goals here only use one plane, so this collapses to 1 or 2;
    /// kept general for callers that build a genuinely two-plane exact
    /// mask.
    pub fn exact_group(mask: u32) -> u32 {
        let first = (mask & 0xFFFF) as u16;
        let second = (mask >> 16) as u16;
        u32::from(first & second != 0)
            + u32::from(first & !second != 0)
            + u32::from(!first & second != 0)
            + u32::from(!first & !second != 0)
    }

    /// Gather `bits`'s bit at lane `map.lane(i)` into bit `i` of the
    /// result, for every lane: the bit-plane analogue of [`Map::apply`].
    fn gather(bits: u16, map: Map) -> u16 {
        let mut out = 0u16;
        for i in 0..16 {
            if (bits >> map.lane(i)) & 1 != 0 {
                out |= 1 << i;
            }
        }
        out
    }

    /// Push a hex layer onto the *front* of the chain that must still
    /// realize this (possibly partial) requirement: the mask a caller
    /// must satisfy *before* `map` is applied, so that applying `map`
    /// yields something satisfying `self` (`dbin_partial_unprepend_map`).
    pub fn prepend(self, map: Map) -> Self {
        DbinMap {
            ones: Self::gather(self.ones, map),
            zeros: Self::gather(self.zeros, map),
        }
    }
}

/// Gather a single 16-bit exact pattern through a hex layer
/// (`dbin_exact_prepend_map_packed64`, restricted to one plane since
/// exact maps never need a zeros plane distinct from `!ones`).
pub fn exact_prepend(map: Map, source_bits: u16) -> u16 {
    DbinMap::gather(source_bits, map)
}
