//! Error types for the driver
//!
//! The TM1637 protocol has no failure reporting beyond the per-byte
//! acknowledgement, and a missing acknowledgement is deliberately not an
//! error (see [`Display::acknowledged`](crate::display::Display::acknowledged)).
//! Formatting never fails either: oversized numbers render dashes and
//! unknown characters render blank. What remains is the GPIO layer, whose
//! errors are passed through unchanged.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use tm1637_tiny::{DisplayInterface, Error};
//!
//! struct NullBus;
//! impl DisplayInterface for NullBus {
//!     type Error = Infallible;
//!     fn start(&mut self) -> Result<(), Infallible> { Ok(()) }
//!     fn stop(&mut self) -> Result<(), Infallible> { Ok(()) }
//!     fn write_byte(&mut self, _byte: u8) -> Result<bool, Infallible> { Ok(true) }
//!     fn release(&mut self) -> Result<(), Infallible> { Ok(()) }
//! }
//!
//! fn describe(err: &Error<NullBus>) -> &'static str {
//!     match err {
//!         Error::Interface(_) => "bus failure",
//!     }
//! }
//! # let _ = describe;
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: DisplayInterface> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}
