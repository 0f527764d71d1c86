//! Upside-down mounting support
//!
//! A module mounted upside down shows each glyph rotated by 180°: segment A
//! swaps with D, B with E, C with F, and G stays put. The digit order
//! reverses as well.
//!
//! The decimal point is the awkward part. It sits at the bottom right of a
//! digit, so after rotation it appears at the top left, which visually
//! belongs to the gap on the *other* side of the digit. To keep a dot between
//! the same pair of digits, the dot for output position `k` is borrowed from
//! the input position `N - k - 2` rather than the digit mirrored into
//! that slot.
//!
//! ## Example
//!
//! ```
//! use tm1637_tiny::orientation::{flip_digits, mirror_segments};
//! use tm1637_tiny::segment::{SEG_A, SEG_D, SEG_DP};
//!
//! assert_eq!(mirror_segments(SEG_A), SEG_D);
//!
//! // " 1.2 " on a 4-digit module: the dot stays in the middle gap
//! let flipped = flip_digits(&[0, 0x06 | SEG_DP, 0x5B, 0]);
//! assert_eq!(flipped[1] & SEG_DP, SEG_DP);
//! assert_eq!(flipped[2] & SEG_DP, 0);
//! ```

use crate::segment::{SEG_DP, SEG_G};

const LOWER_HALF: u8 = 0b0000_0111;
const UPPER_HALF: u8 = 0b0011_1000;

/// Rotate a glyph by 180°
///
/// Swaps segments A-C with D-F and keeps G. The dot bit is dropped; see
/// [`flip_digits`] for where it goes.
pub const fn mirror_segments(code: u8) -> u8 {
    ((code >> 3) & LOWER_HALF) | ((code << 3) & UPPER_HALF) | (code & SEG_G)
}

/// Apply the upside-down transform to a whole digit buffer
///
/// Output position `k` holds the mirrored glyph of input position
/// `N - 1 - k` and the dot bit of input position `N - k - 2` (none for the
/// last position).
pub fn flip_digits<const N: usize>(digits: &[u8; N]) -> [u8; N] {
    let mut out = [0u8; N];
    for (k, slot) in out.iter_mut().enumerate() {
        let dot = (N - k)
            .checked_sub(2)
            .map_or(0, |borrowed| digits[borrowed] & SEG_DP);
        *slot = mirror_segments(digits[N - 1 - k]) | dot;
    }
    out
}
