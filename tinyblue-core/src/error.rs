//! Navigation error types

use core::fmt;

/// Errors raised by the menu model itself (no display involvement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavError {
    /// No screen is registered under the requested path
    UnknownPath,
    /// A screen without items has no valid cursor position
    EmptyScreen,
    /// Nothing has been opened yet
    NoActiveScreen,
    /// Item slot does not exist on the screen
    SlotOutOfRange,
    /// Screen already holds `MAX_ITEMS` items
    ScreenFull,
    /// Registry already holds `MAX_SCREENS` screens
    RegistryFull,
    /// Navigation history reached `MAX_DEPTH`
    StackFull,
    /// Item text longer than `MAX_TEXT_LEN`
    TextTooLong,
    /// Path longer than `MAX_PATH_LEN`
    PathTooLong,
    /// Rows or columns outside what a character LCD can show
    InvalidGeometry,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            NavError::UnknownPath => "unknown screen path",
            NavError::EmptyScreen => "screen has no items",
            NavError::NoActiveScreen => "no screen to show, call open_screen first",
            NavError::SlotOutOfRange => "item slot out of range",
            NavError::ScreenFull => "too many items on screen",
            NavError::RegistryFull => "too many screens",
            NavError::StackFull => "navigation history too deep",
            NavError::TextTooLong => "item text too long",
            NavError::PathTooLong => "screen path too long",
            NavError::InvalidGeometry => "invalid display geometry",
        };
        f.write_str(msg)
    }
}

/// Engine error: either a navigation error or a failure from the display
///
/// Display errors are passed through untouched; the engine never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Menu model error
    Nav(NavError),
    /// Error reported by the display driver
    Display(E),
}

impl<E> From<NavError> for Error<E> {
    fn from(err: NavError) -> Self {
        Error::Nav(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Nav(err) => write!(f, "{}", err),
            Error::Display(err) => write!(f, "display error: {:?}", err),
        }
    }
}

impl<E> Error<E> {
    /// Returns the navigation error, if this is one
    pub fn nav(&self) -> Option<NavError> {
        match self {
            Error::Nav(err) => Some(*err),
            Error::Display(_) => None,
        }
    }
}
