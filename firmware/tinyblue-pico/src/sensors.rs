//! On-chip readings shown on the root screen

use crate::HEAP;

/// ADC reference voltage
const VREF: f32 = 3.3;

/// Full scale of the 12-bit ADC
const ADC_FULL_SCALE: f32 = 4096.0;

/// Convert a raw RP2040 temperature sensor sample to degrees Celsius
///
/// The sensor reads 0.706 V at 27 C with a slope of -1.721 mV/C.
pub fn celsius(raw: u16) -> f32 {
    let voltage = raw as f32 * VREF / ADC_FULL_SCALE;
    27.0 - (voltage - 0.706) / 0.001721
}

/// Free heap in KiB
pub fn free_heap_kb() -> usize {
    HEAP.free() / 1024
}
