//! TM1637 7-Segment Display Driver
//!
//! A driver for TM1637 based LED modules with 4 or 6 seven-segment digits.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support, bit-banged over any two GPIO pins
//! - Decimal, hexadecimal and floating point numbers with dot/colon control
//! - Text with blocking or non-blocking scrolling
//! - Raw frame animations driven by a millisecond clock
//! - Upside-down mounting and brightness control
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use tm1637_tiny::{Builder, Display4, Interface};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # #[derive(Clone, Copy)]
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let clk = MockPin;
//! # let dio = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(clk, dio, delay);
//! let config = Builder::new().brightness(4).build();
//!
//! let mut display = Display4::new(interface, config);
//! let _ = display.begin(true);
//! let _ = display.show_number_dec(1230, 0b0100_0000, true, 4, 0);
//! let _ = display.show_string("HELLO", &mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Non-blocking animation and scrolling
pub mod animation;
/// TM1637 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Number, text and level formatting
pub mod format;
/// Hardware interface abstraction
pub mod interface;
/// Upside-down rendering
pub mod orientation;
/// Seven-segment character encoding
pub mod segment;
/// Monotonic time source
pub mod time;

pub use animation::{AnimationKind, Animator, Storage};
pub use config::{Builder, Config, DEFAULT_SCROLL_DELAY_MS};
pub use display::{Display, Display4, Display6};
pub use error::Error;
pub use interface::InterfaceError;
pub use interface::{DEFAULT_BIT_DELAY_US, DisplayInterface, Interface};
pub use segment::{encode_ascii, encode_char, encode_digit};
pub use time::Clock;
