//! Hardware abstraction traits
//!
//! These traits define the interface between the menu engine and the
//! hardware-specific display implementations.

pub mod display;

pub use display::{CharDisplay, Glyph};
