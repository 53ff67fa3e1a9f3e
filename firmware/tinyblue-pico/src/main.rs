//! TinyBlue demo for the Raspberry Pi Pico
//!
//! 16x2 HD44780 LCD on a PCF8574 backpack (I2C0, SCL = GP17, SDA = GP16),
//! scroll button on GP6 and select button on GP13, both to ground.
//! The root screen shows the die temperature and free heap, refreshed once
//! a second.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Duration, Instant, Ticker};
use embedded_alloc::LlffHeap as Heap;
use {defmt_rtt as _, panic_probe as _};

use tinyblue_core::MenuConfig;
use tinyblue_drivers::input::ButtonPad;
use tinyblue_drivers::lcd::{Hd44780, DEFAULT_ADDRESS};

use crate::menu::{App, Menu};

mod menu;
mod sensors;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

// Heap reported on the root screen
#[global_allocator]
static HEAP: Heap = Heap::empty();

const HEAP_SIZE: usize = 16 * 1024;

/// Button sampling period
const POLL_INTERVAL_MS: u64 = 5;

/// Sensor row refresh period
const REFRESH_INTERVAL_MS: u32 = 1000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("TinyBlue demo starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let mut bus = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, i2c_config);

    let address = match scan(&mut bus) {
        Some(address) => address,
        None => {
            warn!("No I2C device found, trying {=u8:#x}", DEFAULT_ADDRESS);
            DEFAULT_ADDRESS
        }
    };
    info!("LCD at {=u8:#x}", address);

    let config = MenuConfig::LCD_1602;
    let mut lcd = match Hd44780::for_menu(bus, Delay, address, &config) {
        Ok(lcd) => lcd,
        Err(e) => defmt::panic!("LCD geometry rejected: {}", e),
    };
    if let Err(e) = lcd.init() {
        defmt::panic!("LCD init failed: {}", e);
    }

    let mut menu: Menu = match Menu::new(lcd, config) {
        Ok(menu) => menu,
        Err(e) => defmt::panic!("Menu config rejected: {}", e),
    };
    if let Err(e) = menu::build(&mut menu) {
        defmt::panic!("Menu build failed: {}", e);
    }
    if let Err(e) = menu.open_screen(menu::ROOT) {
        defmt::panic!("Failed to open root screen: {}", e);
    }

    let mut app = App::new(Output::new(p.PIN_25, Level::Low));
    let mut buttons = ButtonPad::new(
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
    );

    let mut adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let mut temp_sensor = Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);

    info!("Menu ready");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let start = Instant::now();
    let mut last_refresh: Option<u32> = None;

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis() as u32;

        if let Ok(Some(event)) = buttons.poll(now_ms) {
            if let Err(e) = menu.handle(event, &mut app) {
                warn!("Menu event {} failed: {}", event, e);
            }
        }

        let due = match last_refresh {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= REFRESH_INTERVAL_MS,
        };
        if due {
            last_refresh = Some(now_ms);
            let temp_raw = match adc.read(&mut temp_sensor).await {
                Ok(raw) => Some(raw),
                Err(e) => {
                    warn!("Temperature read failed: {}", e);
                    None
                }
            };
            if let Err(e) = menu::refresh_readings(&mut menu, temp_raw) {
                warn!("Sensor refresh failed: {}", e);
            }
        }
    }
}

/// Address of the first device that acknowledges a read
fn scan<B: embedded_hal::i2c::I2c>(bus: &mut B) -> Option<u8> {
    let mut byte = [0u8; 1];
    (0x08..0x78).find(|&address| bus.read(address, &mut byte).is_ok())
}

fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
