//! Hardware drivers for the TinyBlue menu engine
//!
//! Implementations of the `tinyblue-core` seams on top of `embedded-hal`:
//!
//! - HD44780 character LCDs behind a PCF8574 I2C backpack
//! - Debounced push buttons mapped to navigation events

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod lcd;
