//! Board-agnostic menu engine for character LCDs
//!
//! This crate contains the navigation logic that does not depend on any
//! specific display or input hardware:
//!
//! - Items, screens and the path-keyed screen registry
//! - Navigation history with back support
//! - Cursor/scroll-window math for a fixed rows x columns grid
//! - The `TinyBlue` engine and its incremental renderer
//! - The `CharDisplay` trait implemented by display drivers
//!
//! # Example
//!
//! ```ignore
//! let mut menu: TinyBlue<_, App> = TinyBlue::new(lcd, MenuConfig::LCD_1602)?;
//! menu.add_screen("/", Screen::new([
//!     Item::activatable("LED", open_led as Callback<_, _>)?,
//!     Item::new("Temp 21.5C")?,
//! ])?)?;
//! menu.open_screen("/")?;
//!
//! loop {
//!     if let Some(event) = buttons.poll(now_ms)? {
//!         menu.handle(event, &mut app)?;
//!     }
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod item;
pub mod registry;
pub mod screen;
pub mod stack;
pub mod traits;

pub use config::MenuConfig;
pub use engine::{Callback, MenuItem, MenuScreen, TinyBlue};
pub use error::{Error, NavError};
pub use input::{Direction, NavigationEvent};
pub use item::{Action, Item};
pub use registry::ScreenRegistry;
pub use screen::{CursorMove, Screen};
pub use stack::NavigationStack;
pub use traits::{CharDisplay, Glyph};
