//! HD44780 over PCF8574 driver
//!
//! The common "I2C backpack" wires the expander as:
//!
//! ```text
//! P7 P6 P5 P4 | P3  P2 P1 P0
//! D7 D6 D5 D4 | BL  EN RW RS
//! ```
//!
//! so every controller byte is sent as two nibbles, each latched with an
//! enable pulse. RW is never set; the busy flag is not read and fixed
//! delays cover command execution.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use log::warn;

use abfahrt_core::config::{ROWS, ROW_WIDTH};
use abfahrt_core::marquee::Line;
use abfahrt_core::traits::DisplaySurface;

/// Default PCF8574 address with A0..A2 pulled high
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Expander pin masks
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instruction set
#[allow(dead_code)]
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode flags
    pub const ENTRY_LEFT: u8 = 0x02;

    // Display control flags
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    // Function set flags
    pub const TWO_LINE: u8 = 0x08;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; ROWS] = [0x00, 0x40];

/// LCD errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdError {
    /// I2C transfer failed
    Bus(ErrorKind),
    /// Cursor position outside the panel
    OutOfRange,
}

/// Character LCD driver
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    /// Display control flags currently applied
    control: u8,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver at `DEFAULT_ADDRESS`
    ///
    /// Call [`init`](Self::init) before anything else.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    /// Create a driver at a custom expander address
    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            control: cmd::DISPLAY_ON,
        }
    }

    /// Run the 4-bit initialization sequence
    ///
    /// Leaves the display on, cleared, cursor hidden, blink off and the
    /// backlight lit.
    pub fn init(&mut self) -> Result<(), LcdError> {
        // Power-on settle
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20)?;

        self.command(cmd::FUNCTION_SET | cmd::TWO_LINE)?;
        self.control = cmd::DISPLAY_ON;
        self.command(cmd::DISPLAY_CONTROL | self.control)?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_LEFT)?;
        self.command(cmd::HOME)?;
        self.delay.delay_us(2000);

        Ok(())
    }

    /// Clear all characters and home the cursor
    pub fn clear(&mut self) -> Result<(), LcdError> {
        self.command(cmd::CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError> {
        if col as usize >= ROW_WIDTH || row as usize >= ROWS {
            return Err(LcdError::OutOfRange);
        }
        self.command(cmd::SET_DDRAM_ADDR | (ROW_OFFSETS[row as usize] + col))
    }

    /// Write raw glyph codes at the cursor
    ///
    /// Bytes go to the character ROM unchanged; transcoding happens
    /// upstream.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError> {
        for &byte in bytes {
            self.send(byte, pin::RS)?;
        }
        Ok(())
    }

    /// Enable or disable the blinking block cursor
    pub fn set_blink(&mut self, on: bool) -> Result<(), LcdError> {
        if on {
            self.control |= cmd::BLINK_ON;
        } else {
            self.control &= !cmd::BLINK_ON;
        }
        self.command(cmd::DISPLAY_CONTROL | self.control)
    }

    fn command(&mut self, value: u8) -> Result<(), LcdError> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), LcdError> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble((value << 4) | mode)
    }

    fn write_nibble(&mut self, value: u8) -> Result<(), LcdError> {
        self.expander_write(value)?;
        self.expander_write(value | pin::EN)?;
        self.delay.delay_us(1);
        self.expander_write(value & !pin::EN)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, data: u8) -> Result<(), LcdError> {
        self.i2c
            .write(self.address, &[data | pin::BACKLIGHT])
            .map_err(|e| LcdError::Bus(e.kind()))
    }
}

impl<I2C, D> DisplaySurface for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn set_cursor(&mut self, col: u8, row: u8) {
        if let Err(e) = Hd44780::set_cursor(self, col, row) {
            warn!("LCD cursor move failed: {:?}", e);
        }
    }

    fn write_line(&mut self, row: u8, line: &Line) {
        let result = Hd44780::set_cursor(self, 0, row).and_then(|_| self.write_bytes(line));
        if let Err(e) = result {
            warn!("LCD row {} write failed: {:?}", row, e);
        }
    }
}
