//! HD44780 character LCD behind a PCF8574 I2C backpack
//!
//! The common "I2C LCD" modules wire the PCF8574 expander to the LCD in
//! 4-bit mode:
//!
//! ```text
//! P7 P6 P5 P4 | P3        | P2 | P1 | P0
//! D7 D6 D5 D4 | backlight | EN | RW | RS
//! ```
//!
//! Every byte is sent as two nibbles, each latched by pulsing EN.
//! The three menu cursors are loaded into CGRAM slots 0-2 by `init`.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use tinyblue_core::config::{MenuConfig, MAX_COLUMNS, MAX_ROWS};
use tinyblue_core::{CharDisplay, Glyph, NavError};

/// Default PCF8574 address (PCF8574A modules use 0x3F)
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// PCF8574 pin masks
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instruction set
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const ENTRY_INC: u8 = 0x02;
    pub const ON_CTRL: u8 = 0x08;
    pub const ON_DISPLAY: u8 = 0x04;
    pub const ON_CURSOR: u8 = 0x02;
    pub const ON_BLINK: u8 = 0x01;
    pub const FUNCTION: u8 = 0x20;
    pub const FUNCTION_8BIT: u8 = 0x10;
    pub const FUNCTION_2LINES: u8 = 0x08;
    pub const CGRAM: u8 = 0x40;
    pub const DDRAM: u8 = 0x80;
}

/// CGRAM slot for each cursor glyph
pub const GLYPH_NOT_SELECTABLE: u8 = 0;
pub const GLYPH_SELECTABLE: u8 = 1;
pub const GLYPH_BACK: u8 = 2;

/// 5x8 bitmaps for the cursor glyphs, one byte per pixel row
pub const CURSOR_BITMAPS: [(u8, [u8; 8]); 3] = [
    // Thin arrow: plain item
    (GLYPH_NOT_SELECTABLE, [0x00, 0x08, 0x04, 0x02, 0x04, 0x08, 0x00, 0x00]),
    // Arrow with shaft: item with an action
    (GLYPH_SELECTABLE, [0x00, 0x08, 0x04, 0x1E, 0x04, 0x08, 0x00, 0x00]),
    // Left arrow: back item
    (GLYPH_BACK, [0x00, 0x04, 0x08, 0x1E, 0x08, 0x04, 0x00, 0x00]),
];

/// Widest display a single controller can drive with four rows
pub const MAX_FOUR_ROW_COLUMNS: u8 = 20;

/// Character written for anything outside the ASCII range
const REPLACEMENT: u8 = b'?';

/// HD44780 + PCF8574 driver
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    rows: u8,
    columns: u8,
    backlight: bool,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver for a `rows` x `columns` display
    ///
    /// Call `init` before drawing.
    pub fn new(i2c: I2C, delay: D, address: u8, rows: u8, columns: u8) -> Result<Self, NavError> {
        if rows == 0 || rows > MAX_ROWS || columns == 0 || columns > MAX_COLUMNS {
            return Err(NavError::InvalidGeometry);
        }
        // Rows 2 and 3 share the 40-byte DDRAM lines of rows 0 and 1
        if rows > 2 && columns > MAX_FOUR_ROW_COLUMNS {
            return Err(NavError::InvalidGeometry);
        }
        Ok(Self {
            i2c,
            delay,
            address,
            rows,
            columns,
            backlight: true,
        })
    }

    /// Create a driver matching a menu configuration
    pub fn for_menu(i2c: I2C, delay: D, address: u8, config: &MenuConfig) -> Result<Self, NavError> {
        Self::new(i2c, delay, address, config.rows, config.columns)
    }

    /// Reset the controller into 4-bit mode and load the cursor glyphs
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.expander_write(0)?;
        self.delay.delay_ms(20);

        // Power-on reset: three 8-bit function sets, then switch to 4 bits
        self.write_nibble(cmd::FUNCTION | cmd::FUNCTION_8BIT, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(cmd::FUNCTION | cmd::FUNCTION_8BIT, false)?;
        self.delay.delay_ms(1);
        self.write_nibble(cmd::FUNCTION | cmd::FUNCTION_8BIT, false)?;
        self.delay.delay_ms(1);
        self.write_nibble(cmd::FUNCTION, false)?;
        self.delay.delay_ms(1);

        let mut function = cmd::FUNCTION;
        if self.rows > 1 {
            function |= cmd::FUNCTION_2LINES;
        }
        self.command(function)?;
        self.display_off()?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_INC)?;
        self.display_on()?;

        for (slot, bitmap) in CURSOR_BITMAPS {
            self.custom_char(slot, &bitmap)?;
        }
        self.move_to(0, 0)
    }

    /// Blank the screen and home the cursor
    pub fn clear(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::CLEAR)?;
        self.command(cmd::HOME)?;
        // Clear and home take up to 1.52 ms
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Home the cursor without clearing
    pub fn home(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::HOME)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Turn the display on (cursor and blink off)
    pub fn display_on(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::ON_CTRL | cmd::ON_DISPLAY)
    }

    /// Turn the display off, keeping its contents
    pub fn display_off(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::ON_CTRL)
    }

    /// Switch the backlight
    pub fn set_backlight(&mut self, on: bool) -> Result<(), I2C::Error> {
        self.backlight = on;
        self.expander_write(0)
    }

    /// Backlight state
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Display lines
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Characters per line
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Move the write position
    ///
    /// Rows 1 and 3 start at DDRAM 0x40; rows 2 and 3 continue after the
    /// first `columns` characters of rows 0 and 1.
    pub fn move_to(&mut self, row: u8, col: u8) -> Result<(), I2C::Error> {
        self.command(cmd::DDRAM | ddram_address(row, col, self.columns))
    }

    /// Write one character code at the current position
    pub fn putchar(&mut self, code: u8) -> Result<(), I2C::Error> {
        self.write_byte(code, true)
    }

    /// Write a string at the current position
    pub fn putstr(&mut self, text: &str) -> Result<(), I2C::Error> {
        for ch in text.chars() {
            self.putchar(char_code(ch))?;
        }
        Ok(())
    }

    /// Define custom character `slot` (0-7) from a 5x8 bitmap
    pub fn custom_char(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), I2C::Error> {
        self.command(cmd::CGRAM | ((slot & 0x07) << 3))?;
        for &line in bitmap {
            self.write_byte(line, true)?;
        }
        // Back to DDRAM so the next data write lands on screen
        self.move_to(0, 0)
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.write_byte(value, false)?;
        // Most instructions need 37 us
        self.delay.delay_us(40);
        Ok(())
    }

    fn write_byte(&mut self, value: u8, data: bool) -> Result<(), I2C::Error> {
        self.write_nibble(value & 0xF0, data)?;
        self.write_nibble(value << 4, data)
    }

    /// Latch the upper four bits of `nibble` onto D4-D7
    fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), I2C::Error> {
        let mut bits = nibble & 0xF0;
        if data {
            bits |= pin::RS;
        }
        self.expander_write(bits | pin::EN)?;
        self.expander_write(bits)
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), I2C::Error> {
        let backlight = if self.backlight { pin::BACKLIGHT } else { 0 };
        self.i2c.write(self.address, &[bits | backlight])
    }
}

impl<I2C, D> CharDisplay for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), Self::Error> {
        self.move_to(row, col)?;
        let room = self.columns.saturating_sub(col) as usize;
        for ch in text.chars().take(room) {
            self.putchar(char_code(ch))?;
        }
        Ok(())
    }

    fn write_glyph(&mut self, row: u8, glyph: Glyph) -> Result<(), Self::Error> {
        self.move_to(row, 0)?;
        let code = match glyph {
            Glyph::NotSelectable => GLYPH_NOT_SELECTABLE,
            Glyph::Selectable => GLYPH_SELECTABLE,
            Glyph::Back => GLYPH_BACK,
            Glyph::Blank => b' ',
        };
        self.putchar(code)
    }
}

/// DDRAM address of `(row, col)` on a display `columns` wide
pub fn ddram_address(row: u8, col: u8, columns: u8) -> u8 {
    let mut addr = col & 0x3F;
    if row & 1 != 0 {
        addr += 0x40;
    }
    if row & 2 != 0 {
        addr += columns;
    }
    addr
}

/// Character ROM code for `ch`
fn char_code(ch: char) -> u8 {
    if ch.is_ascii() && !ch.is_ascii_control() {
        ch as u8
    } else {
        REPLACEMENT
    }
}
