//! HD44780 16x2 character LCD over its 8-bit parallel bus.
//!
//! The panel is used write-only: RW is held low and the busy flag is never
//! read back, so every byte is followed by a worst-case settle delay instead.
//! All waits are time-based through [`DelayNs`], never instruction loops.
//!
//! The driver only needs `OutputPin` and `DelayNs`, so any board that can
//! spare eleven push-pull outputs can drive it.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

const CMD_CLEAR: u8 = 0b0000_0001;
const CMD_ENTRY_INCREMENT: u8 = 0b0000_0110;
const CMD_DISPLAY_ON: u8 = 0b0000_1100;
const CMD_FUNCTION_8BIT_2LINE: u8 = 0b0011_1000;
const CMD_SET_DDRAM_ADDR: u8 = 0b1000_0000;

/// DDRAM addresses of the two visible lines.
const LINE_ADDR: [u8; 2] = [0x00, 0x40];

/// Enable-pulse hold time. The controller latches the bus on the falling
/// edge, which needs the level held well above the 450 ns minimum.
const PULSE_US: u32 = 1;
/// Execution time of an ordinary command or data write.
const SETTLE_US: u32 = 50;
/// Clear and the power-on steps run much longer than ordinary commands.
const SLOW_SETTLE_US: u32 = 2_000;
/// Reset time the controller needs after power-on before the first command.
const POWER_ON_US: u32 = 40_000;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Line {
    First,
    Second,
}

pub struct Lcd1602<P, D> {
    rs: P,
    rw: P,
    en: P,
    /// Data bus, `bus[0]` = D0 .. `bus[7]` = D7.
    bus: [P; 8],
    delay: D,
}

impl<P, D> Lcd1602<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    pub fn new(rs: P, rw: P, en: P, bus: [P; 8], delay: D) -> Self {
        Self {
            rs,
            rw,
            en,
            bus,
            delay,
        }
    }

    /// Power-on sequence. Must run once before any other operation.
    pub fn initialize(&mut self) {
        self.rs.set_low().unwrap();
        self.rw.set_low().unwrap();
        self.en.set_low().unwrap();
        self.delay.delay_us(POWER_ON_US);

        self.command(CMD_FUNCTION_8BIT_2LINE);
        self.delay.delay_us(SLOW_SETTLE_US);
        self.command(CMD_DISPLAY_ON);
        self.delay.delay_us(SLOW_SETTLE_US);
        self.clear();
        self.command(CMD_ENTRY_INCREMENT);
        self.delay.delay_us(SLOW_SETTLE_US);
    }

    pub fn clear(&mut self) {
        self.command(CMD_CLEAR);
        self.delay.delay_us(SLOW_SETTLE_US);
    }

    /// Move the cursor to the start of a line.
    pub fn select_line(&mut self, line: Line) {
        self.command(CMD_SET_DDRAM_ADDR | LINE_ADDR[line as usize]);
    }

    /// Write text at the cursor, one enable strobe per character.
    pub fn write_str(&mut self, text: &str) {
        for c in text.chars() {
            self.put(true, glyph(c));
        }
    }

    fn command(&mut self, byte: u8) {
        self.put(false, byte);
    }

    fn put(&mut self, data: bool, byte: u8) {
        self.rs.set_state(data.into()).unwrap();
        self.rw.set_low().unwrap();
        for (i, pin) in self.bus.iter_mut().enumerate() {
            pin.set_state((byte >> i & 1 == 1).into()).unwrap();
        }
        self.strobe();
    }

    /// Assert, hold, deassert, hold. The falling edge latches the bus.
    fn strobe(&mut self) {
        self.en.set_high().unwrap();
        self.delay.delay_us(PULSE_US);
        self.en.set_low().unwrap();
        self.delay.delay_us(SETTLE_US);
    }
}

/// Map a character into the HD44780 A00 character ROM.
///
/// ASCII maps straight through. The degree sign lives at 0xDF in the ROM;
/// anything else non-ASCII renders as the full block so a formatting mistake
/// is visible on the panel instead of silently truncated.
fn glyph(c: char) -> u8 {
    match c {
        '°' => 0xDF,
        c if c.is_ascii() => c as u8,
        _ => 0xFF,
    }
}
