//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::command::{
    ADDRESS_COMMAND, DATA_COMMAND, DISPLAY_COMMAND, MAX_BRIGHTNESS, MAX_DIGITS,
};
use crate::config::Config;
use crate::error::Error;
use crate::format::{
    OVERFLOW_TEXT, apply_dots, format_base, format_float, format_level, format_text,
};
use crate::interface::DisplayInterface;
use crate::orientation::flip_digits;
use crate::segment::{BLANK, encode_char};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Core display driver for the TM1637
///
/// `N` is the number of digits on the module (4 and 6 are the common
/// sizes; the controller supports 1 to 6).
///
/// The driver keeps two digit buffers. The live buffer mirrors what was last
/// sent to the controller, in reading order and unflipped. The scratch
/// buffer is where formatters assemble a new field before it is copied into
/// the live buffer and flushed in one go.
///
/// Every write re-sends all `N` digits along with the brightness setting.
pub struct Display<I, const N: usize>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Live buffer, index 0 = leftmost digit
    digits: [u8; N],
    /// Formatter work area
    scratch: [u8; N],
    /// Whether every byte of the last transaction was acknowledged
    acknowledged: bool,
}

/// Four-digit module
pub type Display4<I> = Display<I, 4>;
/// Six-digit module
pub type Display6<I> = Display<I, 6>;

impl<I, const N: usize> Display<I, N>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`begin`](Self::begin) or the first write.
    pub fn new(interface: I, config: Config) -> Self {
        const {
            assert!(N >= 1 && N <= MAX_DIGITS, "TM1637 supports 1 to 6 digits");
        }
        Self {
            interface,
            config,
            digits: [BLANK; N],
            scratch: [BLANK; N],
            acknowledged: true,
        }
    }

    /// Put the bus in its idle state and optionally blank the display
    ///
    /// With `clear_on_start`, the display is cleared and brightness set to
    /// the maximum.
    pub fn begin(&mut self, clear_on_start: bool) -> DisplayResult<I> {
        debug!("tm1637: begin ({N} digits, clear={clear_on_start})");
        self.interface.release().map_err(Error::Interface)?;
        if clear_on_start {
            self.clear()?;
            self.set_brightness(MAX_BRIGHTNESS, true)?;
        }
        Ok(())
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Borrow the interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Whether the module is rendered upside down
    pub fn flip(&self) -> bool {
        self.config.flip
    }

    /// Set upside-down rendering and redraw the current contents
    pub fn set_flip(&mut self, flip: bool) -> DisplayResult<I> {
        debug!("tm1637: flip={flip}");
        self.config.flip = flip;
        self.write_buffer()
    }

    /// Set brightness (0-7, masked) and the on/off state
    ///
    /// The display control command is sent immediately and repeated on
    /// every later write.
    pub fn set_brightness(&mut self, level: u8, on: bool) -> DisplayResult<I> {
        self.config.brightness = level & MAX_BRIGHTNESS;
        self.config.display_on = on;
        debug!(
            "tm1637: brightness={} on={}",
            self.config.brightness, self.config.display_on
        );
        let acknowledged = self.send_display_control()?;
        self.record_ack(acknowledged);
        Ok(())
    }

    /// Set the delay between steps of a blocking string scroll
    pub fn set_scroll_delay(&mut self, ms: u32) {
        self.config.scroll_delay_ms = ms;
    }

    /// Whether the controller acknowledged every byte of the last transaction
    ///
    /// A missing acknowledgement never fails an operation; this is the only
    /// place it is reported.
    pub fn acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Copy of the live buffer (unflipped, index 0 = leftmost)
    pub fn read_buffer(&self) -> [u8; N] {
        self.digits
    }

    /// Re-send the live buffer
    pub fn write_buffer(&mut self) -> DisplayResult<I> {
        let frame = if self.config.flip {
            flip_digits(&self.digits)
        } else {
            self.digits
        };
        trace!("tm1637: write {frame:02x?}");

        let mut acknowledged = true;

        self.interface.start().map_err(Error::Interface)?;
        acknowledged &= self.write_byte(DATA_COMMAND)?;
        self.interface.stop().map_err(Error::Interface)?;

        self.interface.start().map_err(Error::Interface)?;
        acknowledged &= self.write_byte(ADDRESS_COMMAND)?;
        for byte in frame {
            acknowledged &= self.write_byte(byte)?;
        }
        self.interface.stop().map_err(Error::Interface)?;

        acknowledged &= self.send_display_control()?;
        self.record_ack(acknowledged);
        Ok(())
    }

    /// Write raw segment codes starting at `pos` (0 = leftmost)
    ///
    /// Other digits keep their contents. Codes that would land past the last
    /// digit are dropped. The whole buffer is sent afterwards.
    pub fn set_segments(&mut self, segments: &[u8], pos: usize) -> DisplayResult<I> {
        let pos = pos.min(N);
        let length = segments.len().min(N - pos);
        self.digits[pos..pos + length].copy_from_slice(&segments[..length]);
        self.write_buffer()
    }

    /// Write a single raw segment code at `pos`
    ///
    /// An out-of-range `pos` leaves the buffer unchanged but still refreshes.
    pub fn set_segment(&mut self, segment: u8, pos: usize) -> DisplayResult<I> {
        if let Some(digit) = self.digits.get_mut(pos) {
            *digit = segment;
        }
        self.write_buffer()
    }

    /// Blank every digit
    pub fn clear(&mut self) -> DisplayResult<I> {
        self.set_segments(&[BLANK; N], 0)
    }

    /// Show a decimal integer across the whole display
    pub fn show_number(&mut self, num: i32) -> DisplayResult<I> {
        self.show_number_with(num, false, N, 0)
    }

    /// Show a decimal integer in a field of `length` digits at `pos`
    ///
    /// Without leading zeros the number goes through the floating point
    /// formatter, so values that do not fit show the overflow dashes.
    pub fn show_number_with(
        &mut self,
        num: i32,
        leading_zero: bool,
        length: usize,
        pos: usize,
    ) -> DisplayResult<I> {
        if leading_zero {
            self.show_number_dec(num, 0, true, length, pos)
        } else {
            self.show_float_with(f64::from(num), 0, length, pos)
        }
    }

    /// Show a floating point number across the whole display
    pub fn show_float(&mut self, num: f64, decimal_length: u8) -> DisplayResult<I> {
        self.show_float_with(num, decimal_length, N, 0)
    }

    /// Show a floating point number in a field of `length` digits at `pos`
    ///
    /// At most `decimal_length` decimals are shown, fewer if the integer part
    /// leaves no room. Numbers whose integer part does not fit show `----`.
    pub fn show_float_with(
        &mut self,
        num: f64,
        decimal_length: u8,
        length: usize,
        pos: usize,
    ) -> DisplayResult<I> {
        let length = Self::field_length(length, pos);
        if !format_float(&mut self.scratch[..length], num, decimal_length) {
            debug!("tm1637: {num} does not fit in {length} digits");
            return self.show_overflow(length, pos);
        }
        self.commit_scratch(length, pos)
    }

    /// Show a signed decimal integer with dot control
    ///
    /// `dots` is a bitmask with bit 7 for the first digit of the field, bit 6
    /// for the second and so on. On colon modules the second digit's dot is
    /// the colon (`0b0100_0000`).
    pub fn show_number_dec(
        &mut self,
        num: i32,
        dots: u8,
        leading_zero: bool,
        length: usize,
        pos: usize,
    ) -> DisplayResult<I> {
        self.show_number_base(10, num < 0, num.unsigned_abs(), dots, leading_zero, length, pos)
    }

    /// Show an unsigned hexadecimal integer with dot control
    pub fn show_number_hex(
        &mut self,
        num: u32,
        dots: u8,
        leading_zero: bool,
        length: usize,
        pos: usize,
    ) -> DisplayResult<I> {
        self.show_number_base(16, false, num, dots, leading_zero, length, pos)
    }

    #[allow(clippy::too_many_arguments)]
    fn show_number_base(
        &mut self,
        base: u8,
        negative: bool,
        num: u32,
        dots: u8,
        leading_zero: bool,
        length: usize,
        pos: usize,
    ) -> DisplayResult<I> {
        let length = Self::field_length(length, pos);
        let field = &mut self.scratch[..length];
        format_base(field, base, negative, num, leading_zero);
        apply_dots(field, dots);
        self.commit_scratch(length, pos)
    }

    /// Show text across the whole display, scrolling if it is too long
    pub fn show_string<D: DelayNs>(&mut self, text: &str, delay: &mut D) -> DisplayResult<I> {
        self.show_string_with(text, N, 0, 0, delay)
    }

    /// Show text from read-only storage
    ///
    /// Identical to [`show_string`](Self::show_string); on targets where
    /// string literals live in flash nothing is copied to RAM.
    pub fn show_string_static<D: DelayNs>(
        &mut self,
        text: &'static str,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.show_string_with(text, N, 0, 0, delay)
    }

    /// Show text in a field of `length` digits at `pos`
    ///
    /// Text that fits the display is drawn left-aligned with the `dots`
    /// overlay. Longer text blocks while it scrolls in from the right,
    /// through, and off to the left, pausing for the configured scroll delay
    /// after every step.
    pub fn show_string_with<D: DelayNs>(
        &mut self,
        text: &str,
        length: usize,
        pos: usize,
        dots: u8,
        delay: &mut D,
    ) -> DisplayResult<I> {
        if text.chars().count() <= N {
            return self.render_text(text, length, pos, dots);
        }

        let length = Self::field_length(length, pos);
        let scroll_delay = self.config.scroll_delay_ms;
        self.scratch = [BLANK; N];

        // Every character enters from the right, then N blanks push it off
        let tail = core::iter::repeat_n(BLANK, N);
        for code in text.chars().map(encode_char).chain(tail) {
            self.scratch.copy_within(1.., 0);
            self.scratch[N - 1] = code;
            self.commit_scratch(length, pos)?;
            delay.delay_ms(scroll_delay);
        }
        Ok(())
    }

    /// Show a level meter for `level` percent
    ///
    /// Horizontal meters stack up to three bars in every digit; vertical
    /// meters fill two bars per digit from the left.
    pub fn show_level(&mut self, level: u32, horizontal: bool) -> DisplayResult<I> {
        format_level(&mut self.scratch, level, horizontal);
        self.commit_scratch(N, 0)
    }

    /// Play raw frames, blocking for `frame_ms` after each one
    pub fn show_animation<D: DelayNs>(
        &mut self,
        frames: &[[u8; N]],
        frame_ms: u32,
        delay: &mut D,
    ) -> DisplayResult<I> {
        for frame in frames {
            self.set_segments(frame, 0)?;
            delay.delay_ms(frame_ms);
        }
        Ok(())
    }

    /// Play raw frames from read-only storage
    pub fn show_animation_static<D: DelayNs>(
        &mut self,
        frames: &'static [[u8; N]],
        frame_ms: u32,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.show_animation(frames, frame_ms, delay)
    }

    /// Draw text that fits without scrolling
    pub(crate) fn render_text(
        &mut self,
        text: &str,
        length: usize,
        pos: usize,
        dots: u8,
    ) -> DisplayResult<I> {
        format_text(&mut self.scratch, text);
        apply_dots(&mut self.scratch, dots);
        self.commit_scratch(Self::field_length(length, pos), pos)
    }

    /// Build a full-width frame in scratch and send it
    pub(crate) fn render_frame<F>(&mut self, fill: F) -> DisplayResult<I>
    where
        F: FnOnce(&mut [u8; N]),
    {
        self.scratch = [BLANK; N];
        fill(&mut self.scratch);
        self.commit_scratch(N, 0)
    }

    fn show_overflow(&mut self, length: usize, pos: usize) -> DisplayResult<I> {
        self.render_text(OVERFLOW_TEXT, length, pos, 0)
    }

    /// Copy `scratch[..length]` into the live buffer at `pos` and send it
    fn commit_scratch(&mut self, length: usize, pos: usize) -> DisplayResult<I> {
        let pos = pos.min(N);
        let length = length.min(N - pos);
        self.digits[pos..pos + length].copy_from_slice(&self.scratch[..length]);
        self.write_buffer()
    }

    /// Field width clipped to the digits available from `pos`
    fn field_length(length: usize, pos: usize) -> usize {
        length.min(N.saturating_sub(pos))
    }

    fn send_display_control(&mut self) -> Result<bool, Error<I>> {
        self.interface.start().map_err(Error::Interface)?;
        let acknowledged =
            self.write_byte(DISPLAY_COMMAND | self.config.brightness_nibble())?;
        self.interface.stop().map_err(Error::Interface)?;
        Ok(acknowledged)
    }

    fn write_byte(&mut self, byte: u8) -> Result<bool, Error<I>> {
        self.interface.write_byte(byte).map_err(Error::Interface)
    }

    fn record_ack(&mut self, acknowledged: bool) {
        if !acknowledged {
            warn!("tm1637: controller did not acknowledge");
        }
        self.acknowledged = acknowledged;
    }
}
