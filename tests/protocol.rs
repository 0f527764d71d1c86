//! Wire-level tests against a simulated TM1637
//!
//! The mock pins feed a small bus decoder that recognises start and stop
//! conditions, samples DIO on every rising CLK edge and pulls DIO low during
//! the acknowledge clock the way the controller does.

use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use tm1637_tiny::segment::{DEGREE, MINUS, SEG_D, SEG_DP, encode_ascii, encode_digit};
use tm1637_tiny::{Builder, Config, Display, Display4, Display6, Interface};

#[derive(Debug)]
struct Wire {
    clk: bool,
    dio: bool,
    ack_pull: bool,
    bits: Vec<bool>,
    current: Option<Vec<u8>>,
    transactions: Vec<Vec<u8>>,
}

impl Wire {
    fn shared() -> RefCell<Self> {
        RefCell::new(Self {
            clk: true,
            dio: true,
            ack_pull: false,
            bits: Vec::new(),
            current: None,
            transactions: Vec::new(),
        })
    }

    fn line(&self) -> bool {
        self.dio && !self.ack_pull
    }

    fn set_clk(&mut self, high: bool) {
        if high && !self.clk && self.current.is_some() {
            let level = self.line();
            self.bits.push(level);
        }
        if !high && self.clk {
            match self.bits.len() {
                8 => self.ack_pull = true,
                9 => {
                    let byte = self.bits[..8]
                        .iter()
                        .enumerate()
                        .fold(0u8, |acc, (i, bit)| acc | (u8::from(*bit) << i));
                    if let Some(current) = self.current.as_mut() {
                        current.push(byte);
                    }
                    self.bits.clear();
                    self.ack_pull = false;
                }
                _ => {}
            }
        }
        self.clk = high;
    }

    fn set_dio(&mut self, high: bool) {
        let before = self.line();
        self.dio = high;
        let after = self.line();
        if self.clk && before != after {
            self.bits.clear();
            if after {
                if let Some(done) = self.current.take() {
                    self.transactions.push(done);
                }
            } else {
                self.current = Some(Vec::new());
            }
        }
    }
}

struct Clk<'a>(&'a RefCell<Wire>);
struct Dio<'a>(&'a RefCell<Wire>);

impl ErrorType for Clk<'_> {
    type Error = Infallible;
}

impl ErrorType for Dio<'_> {
    type Error = Infallible;
}

impl OutputPin for Clk<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_clk(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_clk(true);
        Ok(())
    }
}

impl OutputPin for Dio<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_dio(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_dio(true);
        Ok(())
    }
}

impl InputPin for Dio<'_> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.borrow().line())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.borrow().line())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

type Bus<'a> = Interface<Clk<'a>, Dio<'a>, NoDelay>;

fn display<const N: usize>(wire: &RefCell<Wire>, config: Config) -> Display<Bus<'_>, N> {
    let interface = Interface::new(Clk(wire), Dio(wire), NoDelay).with_bit_delay(0);
    Display::new(interface, config)
}

fn transactions(wire: &RefCell<Wire>) -> Vec<Vec<u8>> {
    core::mem::take(&mut wire.borrow_mut().transactions)
}

fn ascii(text: &str) -> Vec<u8> {
    text.bytes().map(encode_ascii).collect()
}

#[test]
fn flush_sends_data_address_and_control() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.show_number_dec(1234, 0, false, 4, 0).unwrap();

    assert_eq!(
        transactions(&wire),
        [vec![0x40], vec![0xC0, 0x06, 0x5B, 0x4F, 0x66], vec![0x8F]]
    );
    assert!(display.acknowledged());
}

#[test]
fn six_digit_module_sends_six_bytes() {
    let wire = Wire::shared();
    let mut display: Display6<_> = display(&wire, Config::default());
    display.show_number_dec(-42, 0, false, 6, 0).unwrap();

    let sent = transactions(&wire);
    assert_eq!(sent[1], [0xC0, 0, 0, 0, MINUS, encode_digit(4), encode_digit(2)]);
}

#[test]
fn begin_clears_and_switches_on() {
    let wire = Wire::shared();
    let config = Builder::new().brightness(1).display_on(false).build();
    let mut display: Display4<_> = display(&wire, config);
    display.begin(true).unwrap();

    let sent = transactions(&wire);
    assert_eq!(sent[1], [0xC0, 0, 0, 0, 0]);
    assert_eq!(sent.last(), Some(&vec![0x8F]));
}

#[test]
fn brightness_command_is_immediate() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.set_brightness(3, true).unwrap();
    display.set_brightness(5, false).unwrap();
    assert_eq!(transactions(&wire), [vec![0x8B], vec![0x85]]);
}

#[test]
fn flipped_output_reverses_and_mirrors() {
    let wire = Wire::shared();
    let config = Builder::new().flip(true).build();
    let mut display: Display4<_> = display(&wire, config);
    display.set_segments(&[SEG_D, 0, 0, 0], 0).unwrap();

    // Bottom bar of the first digit becomes the top bar of the last
    let sent = transactions(&wire);
    assert_eq!(sent[1], [0xC0, 0, 0, 0, 0x01]);
    assert_eq!(display.read_buffer(), [SEG_D, 0, 0, 0]);
}

#[test]
fn zero_without_leading_zeros() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.show_number_dec(0, 0, false, 4, 0).unwrap();
    assert_eq!(display.read_buffer(), [0, 0, 0, encode_digit(0)]);
}

#[test]
fn negative_single_digit() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.show_number_dec(-5, 0, false, 4, 0).unwrap();
    assert_eq!(display.read_buffer(), [0, 0, MINUS, encode_digit(5)]);
}

#[test]
fn float_without_room_for_decimals_keeps_dot() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.show_float_with(1234.5, 1, 4, 0).unwrap();

    let mut expected = ascii("1235");
    expected[3] |= SEG_DP;
    assert_eq!(display.read_buffer().to_vec(), expected);
}

#[test]
fn float_overflow_shows_dashes() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.show_float_with(12345.0, 0, 4, 0).unwrap();
    assert_eq!(display.read_buffer(), [MINUS; 4]);
}

#[test]
fn half_level_horizontal() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.show_level(50, true).unwrap();
    assert_eq!(display.read_buffer(), [SEG_D; 4]);
}

#[test]
fn temperature_with_degree_sign() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.show_string("21°C", &mut NoDelay).unwrap();
    assert_eq!(
        display.read_buffer(),
        [encode_ascii(b'2'), encode_ascii(b'1'), DEGREE, encode_ascii(b'C')]
    );
}

#[test]
fn blocking_scroll_step_count() {
    let wire = Wire::shared();
    let mut display: Display4<_> = display(&wire, Config::default());
    display.show_string("SCROLL", &mut NoDelay).unwrap();

    // Three transactions per step, one step per character and per trailing blank
    assert_eq!(transactions(&wire).len(), 3 * (6 + 4));
    assert_eq!(display.read_buffer(), [0; 4]);
}
