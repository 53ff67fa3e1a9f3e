//! Character display trait
//!
//! The engine only ever needs two primitives: write a run of characters on a
//! row, and write the cursor glyph in the reserved first column.

/// Cursor glyph shown in column 0 of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Focused item that does nothing on select
    NotSelectable,
    /// Focused item with an activation
    Selectable,
    /// Focused back item
    Back,
    /// Row without focus
    Blank,
}

impl Glyph {
    /// ASCII stand-in for displays without custom characters
    pub fn as_ascii(self) -> char {
        match self {
            Glyph::NotSelectable => '>',
            Glyph::Selectable => '=',
            Glyph::Back => '<',
            Glyph::Blank => ' ',
        }
    }
}

/// Trait for character-grid displays
///
/// Rows and columns are 0-based. Implementations must not wrap text onto
/// the next row; the engine clamps every string to the row width before
/// calling `write_at`.
pub trait CharDisplay {
    /// Error type for display operations
    type Error;

    /// Write `text` starting at `(row, col)`
    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), Self::Error>;

    /// Write the cursor glyph into column 0 of `row`
    fn write_glyph(&mut self, row: u8, glyph: Glyph) -> Result<(), Self::Error>;
}

impl<T: CharDisplay + ?Sized> CharDisplay for &mut T {
    type Error = T::Error;

    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), Self::Error> {
        (**self).write_at(row, col, text)
    }

    fn write_glyph(&mut self, row: u8, glyph: Glyph) -> Result<(), Self::Error> {
        (**self).write_glyph(row, glyph)
    }
}
