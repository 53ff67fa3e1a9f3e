//! Demo menu tree
//!
//! ```text
//! /        LED >  Temp  Free RAM  About >
//! /led     Back / LED OFF  Toggle
//! /about   Back  GitHub/Saranomy  Tiny1602Menu
//! ```

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use tinyblue_core::{Callback, Error, Item, Screen, TinyBlue};
use tinyblue_drivers::lcd::Hd44780;

use crate::sensors;

/// 16x2 LCD on I2C0
pub type Lcd = Hd44780<I2c<'static, I2C0, Blocking>, Delay>;

/// Menu engine driving the LCD with the demo context
pub type Menu = TinyBlue<Lcd, App>;

type Cb = Callback<Lcd, App>;
type MenuResult = Result<(), Error<embassy_rp::i2c::Error>>;

pub const ROOT: &str = "/";
pub const LED: &str = "/led";
pub const ABOUT: &str = "/about";

/// Root screen slots refreshed by the main loop
pub const TEMP_SLOT: usize = 1;
pub const RAM_SLOT: usize = 2;

/// `/led` slot whose text follows the LED state
const LED_STATE_SLOT: usize = 0;

/// Hardware touched by menu activations
pub struct App {
    pub led: Output<'static>,
    pub led_on: bool,
}

impl App {
    pub fn new(led: Output<'static>) -> Self {
        Self { led, led_on: false }
    }
}

/// Register every demo screen
pub fn build(menu: &mut Menu) -> MenuResult {
    menu.add_screen(
        LED,
        Screen::new([
            Item::back(led_label(false))?,
            Item::activatable("Toggle", toggle_led as Cb)?,
        ])?,
    )?;

    menu.add_screen(
        ABOUT,
        Screen::new([
            Item::back("Back")?,
            Item::new("GitHub/Saranomy")?,
            Item::new("Tiny1602Menu")?,
        ])?,
    )?;

    menu.add_screen(
        ROOT,
        Screen::new([
            Item::activatable("LED", open_led as Cb)?,
            Item::new("Temp --")?,
            Item::new("Free --")?,
            Item::activatable("About", open_about as Cb)?,
        ])?,
    )
}

/// Update the sensor rows on the root screen
pub fn refresh_readings(menu: &mut Menu, temp_raw: Option<u16>) -> MenuResult {
    match temp_raw {
        Some(raw) => menu.set_fmt(
            ROOT,
            TEMP_SLOT,
            format_args!("Temp {:.2}C", sensors::celsius(raw)),
        )?,
        None => menu.set_text(ROOT, TEMP_SLOT, "Temp ERR")?,
    }
    menu.set_fmt(
        ROOT,
        RAM_SLOT,
        format_args!("Free {}KB", sensors::free_heap_kb()),
    )
}

fn led_label(on: bool) -> &'static str {
    if on {
        "Back / LED ON"
    } else {
        "Back / LED OFF"
    }
}

fn open_led(menu: &mut Menu, _: &mut App) -> MenuResult {
    menu.open_screen(LED)
}

fn open_about(menu: &mut Menu, _: &mut App) -> MenuResult {
    menu.open_screen(ABOUT)
}

fn toggle_led(menu: &mut Menu, app: &mut App) -> MenuResult {
    app.led_on = !app.led_on;
    app.led.toggle();
    info!("LED {}", if app.led_on { "on" } else { "off" });
    menu.set_text(LED, LED_STATE_SLOT, led_label(app.led_on))
}
