//! Headless DMG machine: a flat 64 KiB bus with the timing peripherals the
//! CPU interacts with (timer, serial, LCD timing, OAM DMA).

mod bus;
mod config;
mod gameboy;
mod serial;
mod timer;

pub use bus::{GameBoyBus, IoWriteHook};
pub use config::{GameBoyConfig, RamInit, DEFAULT_RAM_SEED};
pub use gameboy::{GameBoy, CYCLES_PER_FRAME};

/// Total addressable memory for the Game Boy (64 KiB).
const MEMORY_SIZE: usize = 0x10000;

/// Cartridge ROM window (`0x0000..=0x7FFF`). Only ROM-only cartridges fit.
pub const ROM_WINDOW_SIZE: usize = 0x8000;

#[cfg(test)]
mod tests;
