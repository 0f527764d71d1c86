//! Seven-segment glyph encoding
//!
//! Each display position is driven by one byte. Bits 0-6 light segments A-G
//! and bit 7 lights the decimal point (or the colon, on clock-style modules).
//!
//! ```text
//!       A
//!      ---
//!   F |   | B
//!      -G-
//!   E |   | C
//!      ---
//!       D
//! ```
//!
//! ## Example
//!
//! ```
//! use tm1637_tiny::segment::{encode_ascii, encode_digit, DEGREE, SEG_DP};
//!
//! assert_eq!(encode_digit(8), 0b0111_1111);
//! assert_eq!(encode_digit(0x1B), encode_digit(0x0B)); // only the low nibble counts
//! assert_eq!(encode_ascii(b'-'), 0b0100_0000);
//! assert_eq!(encode_ascii(176), DEGREE);
//! assert_eq!(encode_ascii(200), 0);
//! assert_eq!(encode_digit(3) | SEG_DP, 0b1100_1111);
//! ```

/// Segment A (top)
pub const SEG_A: u8 = 0b0000_0001;
/// Segment B (upper right)
pub const SEG_B: u8 = 0b0000_0010;
/// Segment C (lower right)
pub const SEG_C: u8 = 0b0000_0100;
/// Segment D (bottom)
pub const SEG_D: u8 = 0b0000_1000;
/// Segment E (lower left)
pub const SEG_E: u8 = 0b0001_0000;
/// Segment F (upper left)
pub const SEG_F: u8 = 0b0010_0000;
/// Segment G (middle)
pub const SEG_G: u8 = 0b0100_0000;
/// Decimal point or colon
pub const SEG_DP: u8 = 0b1000_0000;

/// All segments off
pub const BLANK: u8 = 0;
/// Minus sign (segment G)
pub const MINUS: u8 = SEG_G;
/// Degree mark (A, B, F, G)
pub const DEGREE: u8 = 0b0110_0011;

/// ASCII code rendered as [`DEGREE`] (Latin-1 `°`)
pub const DEGREE_CODE: u8 = 176;

// XGFEDCBA
const DIGIT_TABLE: [u8; 16] = [
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
    0b0111_0111, // A
    0b0111_1100, // b
    0b0011_1001, // C
    0b0101_1110, // d
    0b0111_1001, // E
    0b0111_0001, // F
];

// Index 0 is ASCII 32 (space)
const ASCII_TABLE: [u8; 96] = [
    0b0000_0000, // space
    0b0000_0110, // !
    0b0010_0010, // "
    0b0100_0001, // #
    0b0110_1101, // $
    0b0101_0010, // %
    0b0111_1100, // &
    0b0000_0010, // '
    0b0011_1001, // (
    0b0000_1111, // )
    0b0010_0001, // *
    0b0111_0000, // +
    0b0000_1000, // ,
    0b0100_0000, // -
    0b0000_1000, // .
    0b0101_0010, // /
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
    0b0100_1000, // :
    0b0100_1000, // ;
    0b0110_0001, // <
    0b0100_1000, // =
    0b0100_0011, // >
    0b0101_0011, // ?
    0b0111_1011, // @
    0b0111_0111, // A
    0b0111_1100, // B
    0b0011_1001, // C
    0b0101_1110, // D
    0b0111_1001, // E
    0b0111_0001, // F
    0b0011_1101, // G
    0b0111_0110, // H
    0b0000_0110, // I
    0b0001_1110, // J
    0b0111_0010, // K
    0b0011_1000, // L
    0b0011_0011, // M (left half, pair with m)
    0b0011_0111, // N
    0b0011_1111, // O
    0b0111_0011, // P
    0b0110_0111, // Q
    0b0011_0001, // R
    0b0110_1101, // S
    0b0111_1000, // T
    0b0011_1110, // U
    0b0011_1110, // V
    0b0011_1100, // W (left half, pair with w)
    0b0111_0110, // X
    0b0110_1110, // Y
    0b0101_1011, // Z
    0b0011_1001, // [
    0b0110_0100, // backslash
    0b0000_1111, // ]
    0b0010_0011, // ^
    0b0000_1000, // _
    0b0010_0000, // `
    0b0101_1111, // a
    0b0111_1100, // b
    0b0101_1000, // c
    0b0101_1110, // d
    0b0111_1011, // e
    0b0111_0001, // f
    0b0110_1111, // g
    0b0111_0100, // h
    0b0000_0100, // i
    0b0000_1110, // j
    0b0111_0000, // k
    0b0001_1000, // l
    0b0010_0111, // m (right half of M)
    0b0101_0100, // n
    0b0101_1100, // o
    0b0111_0011, // p
    0b0110_0111, // q
    0b0101_0000, // r
    0b0110_1101, // s
    0b0111_1000, // t
    0b0001_1100, // u
    0b0001_1100, // v
    0b0001_1110, // w (right half of W)
    0b0111_0110, // x
    0b0110_1110, // y
    0b0101_1011, // z
    0b0100_0110, // {
    0b0011_0000, // |
    0b0111_0000, // }
    0b0100_0000, // ~
    0b0000_0000, // DEL
];

/// Encode a hexadecimal digit
///
/// Only the low nibble of `value` is used, so every input maps to a glyph.
/// 10-15 render as `A b C d E F`; B and D are lowercase so they cannot be
/// confused with 8 and 0.
pub const fn encode_digit(value: u8) -> u8 {
    DIGIT_TABLE[(value & 0x0F) as usize]
}

/// Encode an ASCII character
///
/// Returns [`DEGREE`] for 176, blank for control codes and anything above
/// 127, and the nearest seven-segment glyph otherwise.
pub const fn encode_ascii(value: u8) -> u8 {
    if value == DEGREE_CODE {
        return DEGREE;
    }
    if value < 32 || value > 127 {
        return BLANK;
    }
    ASCII_TABLE[(value - 32) as usize]
}

/// Encode a Rust `char`
///
/// Code points up to U+00FF are treated as Latin-1 and passed to
/// [`encode_ascii`], which makes `'°'` render as a degree mark. Anything
/// wider is blank.
pub const fn encode_char(c: char) -> u8 {
    let code = c as u32;
    if code > 0xFF {
        return BLANK;
    }
    encode_ascii(code as u8)
}
