//! Menu items
//!
//! An item is one line of a screen: its label and what happens when the
//! user selects it.

use core::fmt::Write;

use heapless::String;

use crate::config::{LINE_LEN, MAX_COLUMNS, MAX_TEXT_LEN};
use crate::error::NavError;
use crate::traits::Glyph;

/// Behavior of an item on select
///
/// `A` is the activation payload; the engine uses a function pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action<A> {
    /// Plain text line
    None,
    /// Run the activation
    Invoke(A),
    /// Navigate back to the previous screen
    Back,
}

impl<A> Action<A> {
    /// Cursor glyph for a focused item with this action
    pub fn glyph(&self) -> Glyph {
        match self {
            Action::None => Glyph::NotSelectable,
            Action::Invoke(_) => Glyph::Selectable,
            Action::Back => Glyph::Back,
        }
    }
}

/// A single line of a screen
#[derive(Debug, Clone)]
pub struct Item<A> {
    text: String<MAX_TEXT_LEN>,
    action: Action<A>,
}

impl<A> Item<A> {
    /// Create a plain text item
    pub fn new(text: &str) -> Result<Self, NavError> {
        Self::with(text, Action::None)
    }

    /// Create an item that runs `activation` when selected
    pub fn activatable(text: &str, activation: A) -> Result<Self, NavError> {
        Self::with(text, Action::Invoke(activation))
    }

    /// Create a back item
    pub fn back(text: &str) -> Result<Self, NavError> {
        Self::with(text, Action::Back)
    }

    /// Create an item from an optional activation and a back flag
    ///
    /// When both are given the back flag wins.
    pub fn from_parts(text: &str, activation: Option<A>, is_back: bool) -> Result<Self, NavError> {
        let action = match (is_back, activation) {
            (true, _) => Action::Back,
            (false, Some(activation)) => Action::Invoke(activation),
            (false, None) => Action::None,
        };
        Self::with(text, action)
    }

    /// Create an item with an explicit action
    pub fn with(text: &str, action: Action<A>) -> Result<Self, NavError> {
        let mut item = Self {
            text: String::new(),
            action,
        };
        item.set_text(text)?;
        Ok(item)
    }

    /// Current label
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Replace the label
    ///
    /// This does not touch the display. Items owned by an engine are
    /// updated through `TinyBlue::set_text` so the visible row is redrawn.
    pub fn set_text(&mut self, text: &str) -> Result<(), NavError> {
        let mut new_text = String::new();
        new_text.push_str(text).map_err(|_| NavError::TextTooLong)?;
        self.text = new_text;
        Ok(())
    }

    /// Replace the label with formatted text
    pub fn set_fmt(&mut self, args: core::fmt::Arguments<'_>) -> Result<(), NavError> {
        let mut new_text = String::new();
        new_text.write_fmt(args).map_err(|_| NavError::TextTooLong)?;
        self.text = new_text;
        Ok(())
    }

    /// Action run on select
    pub fn action(&self) -> &Action<A> {
        &self.action
    }

    /// True for back items
    pub fn is_back(&self) -> bool {
        matches!(self.action, Action::Back)
    }

    /// True if selecting the item runs an activation
    pub fn has_activation(&self) -> bool {
        matches!(self.action, Action::Invoke(_))
    }

    /// Cursor glyph shown when this item has focus
    pub fn glyph(&self) -> Glyph {
        self.action.glyph()
    }

    /// Label cut to `width` characters and padded with spaces
    pub fn visible_text(&self, width: usize) -> String<LINE_LEN> {
        pad_line(self.text.as_str(), width)
    }
}

/// Truncate `text` to `width` characters and pad the rest with spaces
///
/// `width` is capped at `MAX_COLUMNS`.
pub fn pad_line(text: &str, width: usize) -> String<LINE_LEN> {
    let width = width.min(MAX_COLUMNS as usize);
    let mut line = String::new();
    let mut used = 0;
    for ch in text.chars().take(width) {
        if line.push(ch).is_err() {
            break;
        }
        used += 1;
    }
    while used < width && line.push(' ').is_ok() {
        used += 1;
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_per_kind() {
        assert_eq!(Item::<()>::new("Temp").unwrap().glyph(), Glyph::NotSelectable);
        assert_eq!(Item::activatable("LED", ()).unwrap().glyph(), Glyph::Selectable);
        assert_eq!(Item::<()>::back("Back").unwrap().glyph(), Glyph::Back);
    }

    #[test]
    fn test_back_wins_over_activation() {
        let item = Item::from_parts("Back / LED ON", Some(7u8), true).unwrap();
        assert!(item.is_back());
        assert!(!item.has_activation());
        assert_eq!(*item.action(), Action::Back);

        let item = Item::from_parts("Toggle", Some(7u8), false).unwrap();
        assert_eq!(*item.action(), Action::Invoke(7));

        let item = Item::<u8>::from_parts("About", None, false).unwrap();
        assert_eq!(*item.action(), Action::None);
    }

    #[test]
    fn test_text_too_long() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(Item::<()>::new(&long).unwrap_err(), NavError::TextTooLong);

        let mut item = Item::<()>::new("ok").unwrap();
        assert_eq!(item.set_text(&long), Err(NavError::TextTooLong));
        // Unchanged on failure
        assert_eq!(item.text(), "ok");
    }

    #[test]
    fn test_stored_text_not_clamped_to_display() {
        let item = Item::<()>::new("GitHub/Saranomy-Tiny1602Menu").unwrap();
        assert_eq!(item.text(), "GitHub/Saranomy-Tiny1602Menu");
        assert_eq!(item.visible_text(15).as_str(), "GitHub/Saranomy");
    }

    #[test]
    fn test_visible_text_pads() {
        let item = Item::<()>::new("LED").unwrap();
        assert_eq!(item.visible_text(6).as_str(), "LED   ");
        assert_eq!(item.visible_text(0).as_str(), "");
    }

    #[test]
    fn test_set_fmt() {
        let mut item = Item::<()>::new("").unwrap();
        item.set_fmt(format_args!("Free {}KB", 180)).unwrap();
        assert_eq!(item.text(), "Free 180KB");
    }

    #[test]
    fn test_pad_line_counts_chars() {
        assert_eq!(pad_line("24°C", 6).as_str(), "24°C  ");
    }
}
