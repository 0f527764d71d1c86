//! Display configuration types and builder

use crate::command::{MAX_BRIGHTNESS, brightness_nibble};

/// Default delay between frames of a blocking string scroll, in milliseconds
pub const DEFAULT_SCROLL_DELAY_MS: u32 = 100;

/// Display configuration
///
/// Use [`Builder`] to create a Config. Bus timing lives on the
/// [`Interface`](crate::interface::Interface) instead, since only the
/// bit-banged transport needs it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Delay between steps of a blocking string scroll
    pub scroll_delay_ms: u32,
    /// Whether the module is mounted upside down
    pub flip: bool,
    /// Brightness level (0-7)
    pub brightness: u8,
    /// Whether the display is switched on
    pub display_on: bool,
}

impl Config {
    /// Brightness level and on flag packed for the display control command
    pub fn brightness_nibble(&self) -> u8 {
        brightness_nibble(self.brightness, self.display_on)
    }
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use tm1637_tiny::Builder;
///
/// let config = Builder::new().scroll_delay_ms(250).flip(true).brightness(3).build();
/// assert_eq!(config.brightness_nibble(), 0x0B);
/// assert!(config.flip);
/// ```
#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct Builder {
    scroll_delay_ms: u32,
    flip: bool,
    brightness: u8,
    display_on: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            scroll_delay_ms: DEFAULT_SCROLL_DELAY_MS,
            flip: false,
            brightness: MAX_BRIGHTNESS,
            display_on: true,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blocking scroll delay
    pub fn scroll_delay_ms(mut self, ms: u32) -> Self {
        self.scroll_delay_ms = ms;
        self
    }

    /// Set upside-down orientation
    pub fn flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Set the brightness level
    ///
    /// Only the low three bits are used.
    pub fn brightness(mut self, level: u8) -> Self {
        self.brightness = level & MAX_BRIGHTNESS;
        self
    }

    /// Switch the display on or off
    pub fn display_on(mut self, on: bool) -> Self {
        self.display_on = on;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            scroll_delay_ms: self.scroll_delay_ms,
            flip: self.flip,
            brightness: self.brightness,
            display_on: self.display_on,
        }
    }
}
