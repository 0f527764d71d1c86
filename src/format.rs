//! Number, text and level formatting
//!
//! These functions fill a slice of segment codes (the display's scratch
//! buffer) and never touch the bus. [`Display`](crate::display::Display)
//! commits the result in one transaction.
//!
//! Cells are filled right to left for numbers, so the slice length is the
//! field width.

use crate::segment::{BLANK, MINUS, SEG_D, SEG_DP, SEG_G, encode_char, encode_digit};

/// Text shown when a number does not fit its field
pub const OVERFLOW_TEXT: &str = "----";

const LEVEL_ONE_BAR: u8 = SEG_D;
const LEVEL_TWO_BARS: u8 = SEG_D | SEG_G;
const LEVEL_THREE_BARS: u8 = 0b0100_1001;
// Segments E+F and B+C: two vertical bars per digit
const LEVEL_LEFT_BAR: u8 = 0b0011_0000;
const LEVEL_BOTH_BARS: u8 = 0b0011_0110;

/// Overlay a dot/colon bitmask
///
/// Bit 7 of `dots` maps to the first cell, bit 6 to the second, and so on.
/// Existing dot bits are kept.
pub fn apply_dots(cells: &mut [u8], dots: u8) {
    let mut dots = dots;
    for cell in cells.iter_mut().take(8) {
        *cell |= dots & SEG_DP;
        dots <<= 1;
    }
}

/// Render an unsigned integer in `base` (clamped to 2..=16)
///
/// Unused leading cells are blank, or `0` when `leading_zero` is set. A
/// value of zero without leading zeros shows a single `0` in the last cell.
/// When `negative` is set the first leading cell becomes a minus sign; if the
/// digits fill the whole field there is no room for it and it is dropped.
/// Digits that do not fit are cut from the left.
pub fn format_base(cells: &mut [u8], base: u8, negative: bool, num: u32, leading_zero: bool) {
    let Some(last) = cells.len().checked_sub(1) else {
        return;
    };
    let base = u32::from(base.clamp(2, 16));

    if num == 0 && !leading_zero {
        cells.fill(BLANK);
        cells[last] = encode_digit(0);
        return;
    }

    let mut num = num;
    let mut negative = negative;
    for cell in cells.iter_mut().rev() {
        let digit = (num % base) as u8;
        let exhausted = digit == 0 && num == 0;

        *cell = if exhausted && !leading_zero {
            BLANK
        } else {
            encode_digit(digit)
        };

        if exhausted && negative {
            *cell = MINUS;
            negative = false;
        }

        num /= base;
    }
}

/// Render a floating point number with up to `decimal_length` decimals
///
/// Returns `false`, leaving `cells` untouched, when the integer part (plus a
/// sign and a leading `0` for magnitudes below one) does not fit.
///
/// The number of decimals shown is limited by the room left after the
/// integer part. The value is rounded half away from zero at that precision.
/// When `decimal_length` is non-zero the decimal point is lit even if no
/// decimals fit, so `1234.5` in four cells shows as `1235.`.
pub fn format_float(cells: &mut [u8], num: f64, decimal_length: u8) -> bool {
    let length = cells.len();
    if length == 0 {
        return false;
    }

    let negative = num < 0.0;
    let magnitude = if negative { -num } else { num };
    let below_one = magnitude < 1.0;

    let mut int_width = count_digits((num as i64).unsigned_abs());
    if negative {
        int_width += 1;
    }
    if below_one {
        int_width += 1;
    }
    if int_width > length {
        return false;
    }

    let decimal_places = (length - int_width).min(usize::from(decimal_length));
    let mut value = num;
    for _ in 0..decimal_places {
        value *= 10.0;
    }
    if num > 0.0 {
        value += 0.5;
    } else if negative {
        value -= 0.5;
    }
    let mut inum = (value as i64).unsigned_abs();

    cells.fill(BLANK);
    if inum == 0 && !below_one {
        cells[length - 1] = encode_digit(0);
        return true;
    }

    let decimal_pos = length.checked_sub(1 + decimal_places);
    let mut negative = negative;
    for (i, cell) in cells.iter_mut().enumerate().rev() {
        let digit = (inum % 10) as u8;
        let left_of_point = decimal_pos.is_some_and(|pos| i < pos);

        if digit == 0 && inum == 0 && (!below_one || left_of_point) {
            *cell = BLANK;
            if negative {
                *cell = MINUS;
                negative = false;
            }
        } else {
            *cell = encode_digit(digit);
        }

        if Some(i) == decimal_pos && decimal_length > 0 {
            *cell |= SEG_DP;
        }
        inum /= 10;
    }
    true
}

/// Render text left-aligned, blank-padded
///
/// Characters past the end of `cells` are ignored.
pub fn format_text(cells: &mut [u8], text: &str) {
    cells.fill(BLANK);
    for (cell, c) in cells.iter_mut().zip(text.chars()) {
        *cell = encode_char(c);
    }
}

/// Render a level meter for `level` percent (clamped to 100)
///
/// Horizontal meters light up to three stacked bars in every cell. Vertical
/// meters light two bars per cell, filling from the left. Any non-zero level
/// lights at least one bar.
pub fn format_level(cells: &mut [u8], level: u32, horizontal: bool) {
    let level = level.min(100);
    cells.fill(BLANK);

    if horizontal {
        let bars = scaled_bars(level, 3);
        let glyph = match bars {
            1 => LEVEL_ONE_BAR,
            2 => LEVEL_TWO_BARS,
            3 => LEVEL_THREE_BARS,
            _ => BLANK,
        };
        cells.fill(glyph);
    } else {
        let bars = scaled_bars(level, 2 * cells.len() as u32) as usize;
        for (x, cell) in cells.iter_mut().enumerate() {
            match bars.saturating_sub(2 * x) {
                0 => {}
                1 => *cell = LEVEL_LEFT_BAR,
                _ => *cell = LEVEL_BOTH_BARS,
            }
        }
    }
}

fn scaled_bars(level: u32, max_bars: u32) -> u32 {
    let bars = level * max_bars / 100;
    if bars == 0 && level > 0 { 1 } else { bars }
}

fn count_digits(mut value: u64) -> usize {
    let mut count = 0;
    while value != 0 {
        value /= 10;
        count += 1;
    }
    count
}
