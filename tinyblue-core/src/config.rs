//! Menu configuration
//!
//! Display geometry and navigation behavior. The configuration is fixed when
//! the engine is built and can be stored in flash as postcard-serialized
//! bytes.

use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Maximum rows on an HD44780-class display
pub const MAX_ROWS: u8 = 4;

/// Maximum columns on an HD44780-class display
pub const MAX_COLUMNS: u8 = 40;

/// Minimum columns: the cursor glyph plus one character
pub const MIN_COLUMNS: u8 = 2;

/// Maximum item text length in bytes
pub const MAX_TEXT_LEN: usize = MAX_COLUMNS as usize;

/// Rendered line buffer in bytes (room for multi-byte text plus padding)
pub const LINE_LEN: usize = 2 * MAX_COLUMNS as usize;

/// Maximum items per screen
pub const MAX_ITEMS: usize = 16;

/// Maximum registered screens (power of two for the index map)
pub const MAX_SCREENS: usize = 16;

/// Maximum screen path length in bytes
pub const MAX_PATH_LEN: usize = 32;

/// Maximum navigation depth
pub const MAX_DEPTH: usize = 8;

/// Path of the root screen by convention
pub const ROOT_PATH: &str = "/";

/// Menu configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
pub struct MenuConfig {
    /// Display lines
    pub rows: u8,
    /// Characters per line, including the cursor column
    pub columns: u8,
    /// Scrolling past either end wraps around
    pub wrap: bool,
    /// Leaving a screen with back resets its cursor to the first item
    pub reset_on_back: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self::LCD_1602
    }
}

impl MenuConfig {
    /// 16x2 display
    pub const LCD_1602: Self = Self {
        rows: 2,
        columns: 16,
        wrap: true,
        reset_on_back: true,
    };

    /// 20x4 display
    pub const LCD_2004: Self = Self {
        rows: 4,
        columns: 20,
        wrap: true,
        reset_on_back: true,
    };

    /// Create a configuration for an arbitrary grid with default behavior
    pub const fn with_geometry(rows: u8, columns: u8) -> Self {
        Self {
            rows,
            columns,
            wrap: true,
            reset_on_back: true,
        }
    }

    /// Check the geometry against what a character LCD supports
    pub fn validate(&self) -> Result<(), NavError> {
        if self.rows == 0 || self.rows > MAX_ROWS {
            return Err(NavError::InvalidGeometry);
        }
        if self.columns < MIN_COLUMNS || self.columns > MAX_COLUMNS {
            return Err(NavError::InvalidGeometry);
        }
        Ok(())
    }

    /// Width available for item text (one column is the cursor)
    pub fn text_width(&self) -> usize {
        self.columns.saturating_sub(1) as usize
    }
}

/// Serialize a configuration into `buf`, returning the used part
pub fn encode<'a>(config: &MenuConfig, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
    postcard::to_slice(config, buf)
}

/// Deserialize and validate a configuration
pub fn decode(bytes: &[u8]) -> Option<MenuConfig> {
    let config: MenuConfig = postcard::from_bytes(bytes).ok()?;
    config.validate().ok()?;
    Some(config)
}
