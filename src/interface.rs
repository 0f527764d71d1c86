//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the bit-banged
//! [`Interface`] struct for talking to the TM1637 over its two-wire bus.
//!
//! ## Hardware Requirements
//!
//! The TM1637 bus is open-drain with external pull-ups:
//! - **CLK**: clock line (output)
//! - **DIO**: data line (output + input, read back for the acknowledgement)
//!
//! Both pins must be configured so that `set_low` drives the line low and
//! `set_high` releases it (open-drain output, or input with pull-up).
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use tm1637_tiny::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let mut interface = Interface::new(MockPin, MockPin, MockDelay).with_bit_delay(50);
//!
//! // One framed transaction
//! let _ = interface.start();
//! let _ = interface.write_byte(0x40);
//! let _ = interface.stop();
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default delay between bus edges in microseconds
pub const DEFAULT_BIT_DELAY_US: u32 = 100;

/// Trait for the transport to the TM1637 controller
///
/// [`Display`](crate::display::Display) composes commands out of these
/// framing primitives. Implement it on your own type to drive the bus some
/// other way (a PIO state machine, a test recorder).
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Issue a start condition (DIO falls while CLK is high)
    fn start(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Issue a stop condition, leaving both lines released
    fn stop(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Clock out one byte, least significant bit first
    ///
    /// Returns `true` when the controller acknowledged the byte.
    fn write_byte(&mut self, byte: u8) -> InterfaceResult<bool, Self::Error>;

    /// Release both lines to the idle (pulled-up) state
    fn release(&mut self) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Bit-banged implementation of [`DisplayInterface`]
///
/// ## Type Parameters
///
/// * `CLK` - Clock pin implementing [`OutputPin`]
/// * `DIO` - Data pin implementing [`OutputPin`] and [`InputPin`]
/// * `D` - Delay provider implementing [`DelayNs`]
pub struct Interface<CLK, DIO, D> {
    /// Clock line (low = driven, high = released)
    clk: CLK,
    /// Data line (low = driven, high = released)
    dio: DIO,
    /// Delay source for bus timing
    delay: D,
    /// Pause before and after every edge, in microseconds
    bit_delay_us: u32,
}

impl<CLK, DIO, D, PinErr> Interface<CLK, DIO, D>
where
    CLK: OutputPin<Error = PinErr>,
    DIO: OutputPin<Error = PinErr> + InputPin<Error = PinErr>,
    D: DelayNs,
{
    /// Create a new Interface with the default bit delay of 100µs
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        Self {
            clk,
            dio,
            delay,
            bit_delay_us: DEFAULT_BIT_DELAY_US,
        }
    }

    /// Set the delay between bus edges in microseconds
    pub fn with_bit_delay(mut self, bit_delay_us: u32) -> Self {
        self.bit_delay_us = bit_delay_us;
        self
    }

    /// Get the delay between bus edges in microseconds
    pub fn bit_delay(&self) -> u32 {
        self.bit_delay_us
    }

    /// Release the pins and delay provider
    pub fn release_parts(self) -> (CLK, DIO, D) {
        (self.clk, self.dio, self.delay)
    }

    fn bit_delay_wait(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }
}

impl<CLK, DIO, D, PinErr> DisplayInterface for Interface<CLK, DIO, D>
where
    CLK: OutputPin<Error = PinErr>,
    DIO: OutputPin<Error = PinErr> + InputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn start(&mut self) -> InterfaceResult<(), Self::Error> {
        self.dio.set_low().map_err(InterfaceError::Pin)?;
        self.bit_delay_wait();
        Ok(())
    }

    fn stop(&mut self) -> InterfaceResult<(), Self::Error> {
        self.dio.set_low().map_err(InterfaceError::Pin)?;
        self.bit_delay_wait();
        self.clk.set_high().map_err(InterfaceError::Pin)?;
        self.bit_delay_wait();
        self.dio.set_high().map_err(InterfaceError::Pin)?;
        self.bit_delay_wait();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> InterfaceResult<bool, Self::Error> {
        let mut data = byte;

        for _ in 0..8 {
            self.clk.set_low().map_err(InterfaceError::Pin)?;
            self.bit_delay_wait();

            if data & 0x01 != 0 {
                self.dio.set_high().map_err(InterfaceError::Pin)?;
            } else {
                self.dio.set_low().map_err(InterfaceError::Pin)?;
            }
            self.bit_delay_wait();

            self.clk.set_high().map_err(InterfaceError::Pin)?;
            self.bit_delay_wait();
            data >>= 1;
        }

        // Ninth clock: release DIO and let the controller pull it low
        self.clk.set_low().map_err(InterfaceError::Pin)?;
        self.dio.set_high().map_err(InterfaceError::Pin)?;
        self.bit_delay_wait();

        self.clk.set_high().map_err(InterfaceError::Pin)?;
        self.bit_delay_wait();
        let acknowledged = self.dio.is_low().map_err(InterfaceError::Pin)?;

        // Hold DIO low so it cannot rise while CLK is high (a stop condition),
        // whether or not the controller answered.
        self.dio.set_low().map_err(InterfaceError::Pin)?;
        self.bit_delay_wait();

        self.clk.set_low().map_err(InterfaceError::Pin)?;
        self.bit_delay_wait();

        Ok(acknowledged)
    }

    fn release(&mut self) -> InterfaceResult<(), Self::Error> {
        self.clk.set_high().map_err(InterfaceError::Pin)?;
        self.dio.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::digital::ErrorType;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Line {
        Clk,
        Dio,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Low(Line),
        High(Line),
        Read,
        Delay(u32),
    }

    struct Bus {
        events: RefCell<Vec<Event>>,
        ack: bool,
    }

    impl Bus {
        fn new(ack: bool) -> Self {
            Self {
                events: RefCell::new(Vec::new()),
                ack,
            }
        }

        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }
    }

    struct MockPin<'a> {
        bus: &'a Bus,
        line: Line,
    }

    struct MockDelay<'a> {
        bus: &'a Bus,
    }

    impl ErrorType for MockPin<'_> {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.bus.events.borrow_mut().push(Event::Low(self.line));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.bus.events.borrow_mut().push(Event::High(self.line));
            Ok(())
        }
    }

    impl InputPin for MockPin<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.bus.events.borrow_mut().push(Event::Read);
            Ok(!self.bus.ack)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.bus.events.borrow_mut().push(Event::Read);
            Ok(self.bus.ack)
        }
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.bus.events.borrow_mut().push(Event::Delay(ns / 1_000));
        }

        fn delay_us(&mut self, us: u32) {
            self.bus.events.borrow_mut().push(Event::Delay(us));
        }
    }

    fn interface(bus: &Bus) -> Interface<MockPin<'_>, MockPin<'_>, MockDelay<'_>> {
        Interface::new(
            MockPin {
                bus,
                line: Line::Clk,
            },
            MockPin {
                bus,
                line: Line::Dio,
            },
            MockDelay { bus },
        )
    }

    /// Reconstruct the bits sampled on each rising CLK edge
    fn sampled_bits(events: &[Event]) -> Vec<bool> {
        let mut dio_high = true;
        let mut bits = Vec::new();
        for event in events {
            match event {
                Event::High(Line::Dio) => dio_high = true,
                Event::Low(Line::Dio) => dio_high = false,
                Event::High(Line::Clk) => bits.push(dio_high),
                _ => {}
            }
        }
        bits
    }

    #[test]
    fn test_default_bit_delay() {
        let bus = Bus::new(true);
        assert_eq!(interface(&bus).bit_delay(), DEFAULT_BIT_DELAY_US);
        assert_eq!(interface(&bus).with_bit_delay(5).bit_delay(), 5);
    }

    #[test]
    fn test_start_drives_dio_low() {
        let bus = Bus::new(true);
        let mut iface = interface(&bus);
        iface.start().unwrap();
        assert_eq!(
            bus.events(),
            [Event::Low(Line::Dio), Event::Delay(DEFAULT_BIT_DELAY_US)]
        );
    }

    #[test]
    fn test_stop_releases_clk_before_dio() {
        let bus = Bus::new(true);
        let mut iface = interface(&bus).with_bit_delay(7);
        iface.stop().unwrap();
        assert_eq!(
            bus.events(),
            [
                Event::Low(Line::Dio),
                Event::Delay(7),
                Event::High(Line::Clk),
                Event::Delay(7),
                Event::High(Line::Dio),
                Event::Delay(7),
            ]
        );
    }

    #[test]
    fn test_write_byte_lsb_first() {
        let bus = Bus::new(true);
        let mut iface = interface(&bus);
        let ack = iface.write_byte(0b1000_0101).unwrap();
        assert!(ack);

        let bits = sampled_bits(&bus.events());
        // 8 data bits plus the acknowledge clock
        assert_eq!(bits.len(), 9);
        assert_eq!(
            &bits[..8],
            &[true, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_write_byte_reports_missing_ack() {
        let bus = Bus::new(false);
        let mut iface = interface(&bus);
        assert!(!iface.write_byte(0xFF).unwrap());
    }

    #[test]
    fn test_write_byte_holds_dio_low_after_ack() {
        for ack in [true, false] {
            let bus = Bus::new(ack);
            let mut iface = interface(&bus);
            iface.write_byte(0x00).unwrap();
            let events = bus.events();
            let read = events.iter().position(|e| *e == Event::Read).unwrap();
            assert_eq!(events[read + 1], Event::Low(Line::Dio));
            assert_eq!(events.last(), Some(&Event::Delay(DEFAULT_BIT_DELAY_US)));
            assert_eq!(events[events.len() - 2], Event::Low(Line::Clk));
        }
    }

    #[test]
    fn test_release_idles_both_lines() {
        let bus = Bus::new(true);
        let mut iface = interface(&bus);
        iface.release().unwrap();
        assert_eq!(
            bus.events(),
            [Event::High(Line::Clk), Event::High(Line::Dio)]
        );
    }
}
