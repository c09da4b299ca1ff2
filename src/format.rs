//! Chain emission: render a sequence of [`Config`] values as the
//! star/hat-annotated templates used throughout this crate's output.

use crate::hex::Config;

/// One layer's two nibble fields and star/hat markers, as printed.
///
/// The six templates are keyed by the config's *raw* mode byte
/// (`config >> 8`, 0..=5), but the markers themselves reflect the
/// *biased* mode bits, the same bias `hex_layer` applies internally
/// (`biased = raw + 0x100` when `rotate` is set), since that's what
/// actually selects each gate's mode.
pub fn format_config(config: Config) -> String {
    let mode_byte = config.mode_byte();
    let rotate = (mode_byte >> 2) & 1 != 0;
    let biased_mode_byte = if rotate { mode_byte + 1 } else { mode_byte };
    let star_b = biased_mode_byte & 2 != 0;
    let star_s = biased_mode_byte & 1 != 0;

    let b = config.back();
    let s = config.side();

    let mut out = String::new();
    if rotate {
        out.push('^');
    }
    if star_b {
        out.push('*');
    }
    out.push_str(&format!("{:X}, ", b));
    if star_s {
        out.push('*');
    }
    out.push_str(&format!("{:X}", s));
    out
}

/// Render a whole chain, one layer per line, numbered from 1.
pub fn format_chain(chain: &[Config]) -> String {
    chain
        .iter()
        .enumerate()
        .map(|(i, &c)| format!("{}: {}", i + 1, format_config(c)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_for_mode_byte_zero_has_no_markers() {
        let c = Config::new(0x010).unwrap(); // back=1, side=0, mode_byte=0
        assert_eq!(format_config(c), "1, 0");
    }

    #[test]
    fn template_for_mode_byte_one_stars_the_side_field() {
        let c = Config::new(0x100).unwrap(); // mode_byte = 1
        assert_eq!(format_config(c), "0, *0");
    }

    #[test]
    fn template_for_mode_byte_two_stars_the_back_field() {
        let c = Config::new(0x200).unwrap(); // mode_byte = 2
        assert_eq!(format_config(c), "*0, 0");
    }

    #[test]
    fn template_for_mode_byte_four_has_hat_and_stars_side() {
        let c = Config::new(0x400).unwrap(); // mode_byte = 4, rotate
        assert_eq!(format_config(c), "^0, *0");
    }

    #[test]
    fn template_for_mode_byte_five_has_hat_and_stars_back() {
        let c = Config::new(0x500).unwrap(); // mode_byte = 5, rotate
        assert_eq!(format_config(c), "^*0, 0");
    }

    #[test]
    fn chain_is_numbered_from_one() {
        let chain = vec![Config::IDENTITY, Config::new(0x2F0).unwrap()];
        let printed = format_chain(&chain);
        assert!(printed.starts_with("1: "));
        assert!(printed.contains("2: "));
    }
}
