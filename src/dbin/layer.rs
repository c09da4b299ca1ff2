//! The dbin layer family: a distinct, smaller config space (`16*16*4`)
//! from the hex family, whose layers realize a single-bit comparator per
//! lane rather than a 4-bit one.
//!
//! This realizes the same `back`/`side`/`mode`/`rotate`-parameterised
//! comparator shape as [`crate::hex::hex_layer`], reduced to one output
//! bit per lane. See `DESIGN.md` for the reasoning.

/// Number of distinct configs in the dbin-layer family (`16 * 16 * 4`).
pub const DBIN_CONFIG_COUNT: u16 = 16 * 16 * 4;

/// A 10-bit dbin-layer config: `back` (bits 0-3), `side` (bits 4-7),
/// `mode` (bit 8), `rotate` (bit 9).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DbinConfig(pub u16);

impl DbinConfig {
    pub fn new(raw: u16) -> Option<Self> {
        if raw < DBIN_CONFIG_COUNT {
            Some(DbinConfig(raw))
        } else {
            None
        }
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn back(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    pub fn side(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    pub fn mode(self) -> bool {
        (self.0 >> 8) & 1 != 0
    }

    pub fn rotate(self) -> bool {
        (self.0 >> 9) & 1 != 0
    }
}

/// Evaluate one terminal dbin layer directly from identity: the lanes in
/// `[min(back, side), max(back, side))` take one polarity and the rest
/// take the other (`mode` picks which), optionally lane-reversed
/// (`rotate`). This always produces a pattern of shape `1*0*1*` or its
/// complement `0*1*0*` over the 16 lanes, exactly the set the prune
/// table seeds as distance 0 ("realisable by a single terminal 2bin
/// layer").
pub fn dbin_layer(config: DbinConfig) -> u16 {
    let (lo, hi) = if config.back() <= config.side() {
        (config.back(), config.side())
    } else {
        (config.side(), config.back())
    };

    let mut bits = 0u16;
    for lane in 0u8..16 {
        let inside = lane >= lo && lane < hi;
        let bit = inside ^ !config.mode();
        if bit {
            bits |= 1 << lane;
        }
    }

    if config.rotate() {
        bits.reverse_bits()
    } else {
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dbin_layer_is_pure() {
        let c = DbinConfig::new(0x123).unwrap();
        assert_eq!(dbin_layer(c), dbin_layer(c));
    }

    #[test]
    fn dbin_layer_always_matches_the_terminal_shape() {
        // "1*0*1*" (or its complement "0*1*0*") has at most two bit
        // transitions when scanned lane by lane.
        let transitions = |b: u16| -> u32 {
            (0..15)
                .filter(|&lane| ((b >> lane) & 1) != ((b >> (lane + 1)) & 1))
                .count() as u32
        };
        for raw in 0..DBIN_CONFIG_COUNT {
            let bits = dbin_layer(DbinConfig(raw));
            assert!(transitions(bits) <= 2, "raw={raw:#x} bits={bits:016b}");
        }
    }
}
