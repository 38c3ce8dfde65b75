//! # Printer Control Commands
//!
//! The handful of non-graphics commands a raster print job needs: reset,
//! paper feed and cut. ESC/POS and StarPRNT agree on reset and differ on
//! the rest, so builders that differ take a [`CommandSet`].
//!
//! | Command | ESC/POS | StarPRNT |
//! |---------|---------|----------|
//! | Initialize | `ESC @` | `ESC @` |
//! | Feed | `ESC J n` (n dots) | `ESC J n` (n × 1/4 mm) |
//! | Cut | `GS V 0` | `ESC d 2` (feed to cutter, full cut) |
//!
//! Multi-byte integers are little-endian: 0x1234 is sent as `[0x34, 0x12]`.

use super::graphics::CommandSet;

/// ESC (Escape) - command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - extended command prefix
pub const GS: u8 = 0x1D;

/// Largest single `ESC J` parameter.
pub const MAX_FEED_UNITS: u8 = u8::MAX;

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and restores power-on defaults. Sent at the
/// start of every job.
///
/// ```
/// use bluberry::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Feed Paper (ESC J n)
///
/// Feeds `dots` dot rows. StarPRNT counts `ESC J` in quarter millimetres
/// (two dots at 203 DPI) so the amount is halved, rounding up. Feeds
/// larger than one command allows are split across several commands.
///
/// ```
/// use bluberry::protocol::{commands, graphics::CommandSet};
///
/// assert_eq!(commands::feed(CommandSet::EscPos, 24), vec![0x1B, 0x4A, 24]);
/// assert_eq!(commands::feed(CommandSet::StarPrnt, 24), vec![0x1B, 0x4A, 12]);
/// ```
pub fn feed(set: CommandSet, dots: u16) -> Vec<u8> {
    let mut units = match set {
        CommandSet::EscPos => dots,
        CommandSet::StarPrnt => dots.div_ceil(2),
    };

    let mut cmd = Vec::with_capacity(3 * (units as usize).div_ceil(MAX_FEED_UNITS as usize));
    while units > 0 {
        let n = units.min(MAX_FEED_UNITS as u16);
        cmd.extend_from_slice(&[ESC, b'J', n as u8]);
        units -= n;
    }
    cmd
}

/// # Full Cut
///
/// ESC/POS `GS V 0` cuts where the paper is; StarPRNT `ESC d 2` first
/// feeds the last printed row past the blade.
///
/// ```
/// use bluberry::protocol::{commands, graphics::CommandSet};
///
/// assert_eq!(commands::cut(CommandSet::EscPos), vec![0x1D, 0x56, 0x00]);
/// assert_eq!(commands::cut(CommandSet::StarPrnt), vec![0x1B, 0x64, 0x02]);
/// ```
#[inline]
pub fn cut(set: CommandSet) -> Vec<u8> {
    match set {
        CommandSet::EscPos => vec![GS, b'V', 0],
        CommandSet::StarPrnt => vec![ESC, b'd', 2],
    }
}

/// Encode `value` as `[low, high]`.
///
/// ```
/// use bluberry::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(500), [0xF4, 0x01]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_feed_zero_is_empty() {
        assert!(feed(CommandSet::EscPos, 0).is_empty());
        assert!(feed(CommandSet::StarPrnt, 0).is_empty());
    }

    #[test]
    fn test_feed_splits_large_amounts() {
        assert_eq!(
            feed(CommandSet::EscPos, 300),
            vec![0x1B, 0x4A, 255, 0x1B, 0x4A, 45]
        );
        // 601 dots → 301 quarter-mm units
        assert_eq!(
            feed(CommandSet::StarPrnt, 601),
            vec![0x1B, 0x4A, 255, 0x1B, 0x4A, 46]
        );
    }

    #[test]
    fn test_feed_rounds_star_units_up() {
        assert_eq!(feed(CommandSet::StarPrnt, 1), vec![0x1B, 0x4A, 1]);
    }

    #[test]
    fn test_cut() {
        assert_eq!(cut(CommandSet::EscPos), vec![0x1D, b'V', 0]);
        assert_eq!(cut(CommandSet::StarPrnt), vec![0x1B, b'd', 2]);
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0), [0, 0]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
        assert_eq!(u16_le(u16::MAX), [0xFF, 0xFF]);
    }
}
