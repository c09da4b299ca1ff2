//! The hex-layer kernel: a pure function over the 1536-config family.

use crate::packed::Map;

/// Number of distinct configs in the hex-layer family (`16 * 16 * 6`).
///
/// The upper byte of a config only ever takes values `0..=5` (three mode
/// bits, but `mode2 == 1 && rotate == 1` is never a valid pre-bias config),
/// matching the six chain-printing templates in [`crate::format`].
pub const CONFIG_COUNT: u16 = 16 * 16 * 6;

/// An 11-bit hex-layer config: `back2` (bits 0-3), `side1` (bits 4-7),
/// `mode1` (bit 8), `mode2` (bit 9), `rotate` (bit 10).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Config(pub u16);

impl Config {
    pub const IDENTITY: Config = Config(0);

    pub fn new(raw: u16) -> Option<Self> {
        if raw < CONFIG_COUNT {
            Some(Config(raw))
        } else {
            None
        }
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn mode_byte(self) -> u16 {
        self.0 >> 8
    }

    pub fn back(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    pub fn side(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    /// Mode bit for the `back1`/`side1` gate (config bit 9).
    pub fn mode1(self) -> bool {
        (self.mode_byte() & 2) != 0
    }

    pub fn rotate(self) -> bool {
        (self.mode_byte() & 4) != 0
    }
}

/// Evaluate one hex layer: for each of the 16 output lanes, compute two
/// comparator sub-gates and return their lane-wise maximum.
pub fn hex_layer(input: Map, config: Config) -> Map {
    // Bias the config so the mode bits stay independent after rotation;
    // this is a real (carrying) addition, not a bitwise OR.
    let raw = config.0;
    let biased = raw.wrapping_add((raw & 0x400) >> 2);

    let back2 = (biased & 0xF) as u8;
    let side1_const = ((biased >> 4) & 0xF) as u8;
    // Gate 1 (back1/side1) takes its mode from bit 9; gate 2 (back2/side2)
    // takes its mode from bit 8. `rotate` is bit 10.
    let mode1 = (biased >> 9) & 1 != 0;
    let mode2 = (biased >> 8) & 1 != 0;
    let rotate = (biased >> 10) & 1 != 0;

    let lanes = input.to_lanes();
    let out = std::array::from_fn(|i| {
        let in_lane = lanes[i];
        let (back1, side1) = if rotate {
            (side1_const, in_lane)
        } else {
            (in_lane, side1_const)
        };
        let side2 = in_lane;

        let out1 = gate(back1, side1, mode1);
        let out2 = gate(back2, side2, mode2);
        out1.max(out2)
    });
    Map::from_lanes(out)
}

/// One comparator sub-gate: `(side > back) ? 0 : back - (mode ? side : 0)`.
fn gate(back: u8, side: u8, mode: bool) -> u8 {
    if side > back {
        0
    } else {
        back - if mode { side } else { 0 }
    }
}

/// As [`hex_layer`], but processes lanes four at a time instead of one at
/// a time, a quad-wide shape suited to vectorized evaluation, expressed
/// here with ordinary arithmetic rather than platform intrinsics. Produces
/// identical output to [`hex_layer`] for every input; kept as an alternate
/// entry point rather than the default, since the scalar form is the one
/// this crate treats as ground truth.
pub fn hex_layer_batch4(input: Map, config: Config) -> Map {
    let raw = config.0;
    let biased = raw.wrapping_add((raw & 0x400) >> 2);

    let back2 = (biased & 0xF) as u8;
    let side1_const = ((biased >> 4) & 0xF) as u8;
    let mode1 = (biased >> 9) & 1 != 0;
    let mode2 = (biased >> 8) & 1 != 0;
    let rotate = (biased >> 10) & 1 != 0;

    let lanes = input.to_lanes();
    let mut out = [0u8; crate::packed::LANE_COUNT];
    for chunk_start in (0..crate::packed::LANE_COUNT).step_by(4) {
        let quad: [u8; 4] = std::array::from_fn(|j| lanes[chunk_start + j]);
        let result: [u8; 4] = std::array::from_fn(|j| {
            let in_lane = quad[j];
            let (back1, side1) = if rotate {
                (side1_const, in_lane)
            } else {
                (in_lane, side1_const)
            };
            let side2 = in_lane;
            gate(back1, side1, mode1).max(gate(back2, side2, mode2))
        });
        out[chunk_start..chunk_start + 4].copy_from_slice(&result);
    }
    Map::from_lanes(out)
}
