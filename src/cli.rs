//! Command-line surface: `hlp-solver hex ...` / `hlp-solver dbin ...`,
//! built with `clap`'s derive API.

use clap::{Args, Parser, Subcommand};

use crate::dist_check::Accuracy;

#[derive(Parser, Debug)]
#[command(name = "hlp-solver", version, about = "Hex Layer Problem and 2bin chain solver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity; repeatable (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity; repeatable.
    #[arg(short = 'q', long = "quiet", action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for a hex-layer chain realizing a 16-lane function request.
    Hex(HexArgs),
    /// Search for a 2bin chain realizing a 16-bit ones/zeros mask.
    Dbin(DbinArgs),
}

#[derive(Args, Debug)]
pub struct HexArgs {
    /// The requested function, e.g. `0123456789ABCDEF`, using `X`/`.` for
    /// don't-care lanes and `[a-b]` for ranged lanes.
    pub function: String,

    /// Pruning accuracy, -1 (reduced) through 2 (perfect). Mutually
    /// exclusive with `--fast`/`--perfect`.
    #[arg(long, allow_negative_numbers = true)]
    pub accuracy: Option<i8>,

    /// Shorthand for `--accuracy -1`.
    #[arg(short = 'f', long, conflicts_with_all = ["accuracy", "perfect"])]
    pub fast: bool,

    /// Shorthand for `--accuracy 2`.
    #[arg(short = 'p', long, conflicts_with_all = ["accuracy", "fast"])]
    pub perfect: bool,

    /// Largest chain length to search for (clamped to 0..=31).
    #[arg(long, default_value_t = 31)]
    pub max_length: i32,

    /// Transposition cache size as log2(bytes); default 26 (64 MiB).
    #[arg(long)]
    pub cache: Option<u32>,
}

impl HexArgs {
    pub fn resolved_accuracy(&self) -> Accuracy {
        if self.fast {
            return Accuracy::Reduced;
        }
        if self.perfect {
            return Accuracy::Perfect;
        }
        match self.accuracy {
            Some(-1) => Accuracy::Reduced,
            Some(0) => Accuracy::Normal,
            Some(1) => Accuracy::Increased,
            Some(2) => Accuracy::Perfect,
            _ => Accuracy::Normal,
        }
    }
}

#[derive(Args, Debug)]
pub struct DbinArgs {
    /// Forced-1 lane mask, as 4 hex digits. Omit when using `--exact`.
    pub ones: Option<String>,

    /// Forced-0 lane mask, as 4 hex digits. Omit when using `--exact`.
    pub zeros: Option<String>,

    /// An exact 16-bit target mask, e.g. `--exact ABCD`, equivalent to
    /// `ones = ABCD, zeros = !ABCD`.
    #[arg(long, conflicts_with_all = ["ones", "zeros"])]
    pub exact: Option<String>,

    /// Largest chain length to search for.
    #[arg(long, default_value_t = 31)]
    pub max_layers: i32,

    /// Transposition cache size as log2(bytes); default 26 (64 MiB).
    #[arg(long)]
    pub cache: Option<u32>,
}

/// `log::LevelFilter` implied by `-v`/`-q` counts, relative to the
/// default `Info` level (source verbosity >= 2 => debug, >= 3 => trace).
pub fn level_filter(verbose: u8, quiet: u8) -> log::LevelFilter {
    use log::LevelFilter::*;
    let net = i16::from(verbose) - i16::from(quiet);
    match net {
        i16::MIN..=-2 => Error,
        -1 => Warn,
        0 => Info,
        1 => Debug,
        _ => Trace,
    }
}

/// Converts a `--cache N` (log2 total bytes) into the slot-count log2
/// [`crate::cache::TranspositionCache::new`] expects (entries are 16
/// bytes, matching `hlpSetCacheSize`'s `N - 4` conversion).
pub fn cache_size_log(total_bytes_log2: Option<u32>) -> u32 {
    total_bytes_log2.map_or(crate::cache::TranspositionCache::DEFAULT_SIZE_LOG, |n| n.saturating_sub(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_verbosity_is_info() {
        assert_eq!(level_filter(0, 0), log::LevelFilter::Info);
    }

    #[test]
    fn repeated_quiet_drops_below_error() {
        assert_eq!(level_filter(0, 2), log::LevelFilter::Error);
    }

    #[test]
    fn repeated_verbose_reaches_trace() {
        assert_eq!(level_filter(3, 0), log::LevelFilter::Trace);
    }

    #[test]
    fn no_cache_flag_uses_default_slot_log() {
        assert_eq!(cache_size_log(None), crate::cache::TranspositionCache::DEFAULT_SIZE_LOG);
    }

    #[test]
    fn cache_flag_converts_total_bytes_log_to_slot_log() {
        assert_eq!(cache_size_log(Some(26)), 22);
    }

    #[test]
    fn hex_args_fast_flag_forces_reduced_accuracy() {
        let args = HexArgs {
            function: "X".into(),
            accuracy: None,
            fast: true,
            perfect: false,
            max_length: 31,
            cache: None,
        };
        assert_eq!(args.resolved_accuracy(), Accuracy::Reduced);
    }

    #[test]
    fn hex_args_numeric_accuracy_is_used_when_no_shorthand_given() {
        let args = HexArgs {
            function: "X".into(),
            accuracy: Some(1),
            fast: false,
            perfect: false,
            max_length: 31,
            cache: None,
        };
        assert_eq!(args.resolved_accuracy(), Accuracy::Increased);
    }

    #[test]
    fn hex_args_negative_accuracy_matches_fast_shorthand() {
        let args = HexArgs {
            function: "X".into(),
            accuracy: Some(-1),
            fast: false,
            perfect: false,
            max_length: 31,
            cache: None,
        };
        assert_eq!(args.resolved_accuracy(), Accuracy::Reduced);
    }
}
