//! Button input

pub mod buttons;

pub use buttons::{Button, ButtonPad, DEBOUNCE_MS};
