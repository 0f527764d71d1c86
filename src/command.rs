//! TM1637 command definitions
//!
//! The TM1637 understands three command classes, distinguished by the top
//! two bits of the first byte after a start condition. Every refresh sends
//! one of each:
//!
//! 1. Start + [`DATA_COMMAND`] + ACK + Stop
//! 2. Start + [`ADDRESS_COMMAND`] + ACK + (digit + ACK) * N + Stop
//! 3. Start + [`DISPLAY_COMMAND`] | brightness + ACK + Stop
//!
//! ## Example
//!
//! ```
//! use tm1637_tiny::command::{self, brightness_nibble};
//!
//! let cmd = command::DISPLAY_COMMAND | brightness_nibble(3, true);
//! assert_eq!(cmd, 0x8B);
//! ```

/// Data command setting (0x40)
///
/// Write to display registers with automatic address increment, normal mode.
///
/// | Bit | Meaning |
/// |-----|---------|
/// | 1   | 0 = write display data, 1 = read key scan |
/// | 2   | 0 = auto increment, 1 = fixed address |
/// | 3   | 0 = normal mode, 1 = test mode |
pub const DATA_COMMAND: u8 = 0x40;

/// Address command setting (0xC0)
///
/// Low three bits select the first grid (0 = leftmost digit register).
pub const ADDRESS_COMMAND: u8 = 0xC0;

/// Mask for the grid address in [`ADDRESS_COMMAND`]
pub const ADDRESS_MASK: u8 = 0x07;

/// Display control command (0x80)
///
/// Low nibble: bits 0-2 pulse width (brightness), bit 3 display on.
pub const DISPLAY_COMMAND: u8 = 0x80;

/// Display-on flag within the brightness nibble
pub const DISPLAY_ON: u8 = 0x08;

/// Mask for the brightness level
pub const BRIGHTNESS_MASK: u8 = 0x07;

/// Highest brightness level
pub const MAX_BRIGHTNESS: u8 = 7;

/// Number of grid registers on the controller
pub const MAX_DIGITS: usize = 6;

/// Pack a brightness level and on flag into the display command nibble
///
/// Levels above 7 are masked to their low three bits.
pub const fn brightness_nibble(level: u8, on: bool) -> u8 {
    (level & BRIGHTNESS_MASK) | if on { DISPLAY_ON } else { 0 }
}
