use std::fmt;
use std::ops::Index;

use anyhow::{bail, Result};

use super::config::RamInit;
use super::{serial::Serial, timer::Timer, MEMORY_SIZE, ROM_WINDOW_SIZE};

mod dma;
mod init;
mod lcd;
mod mmio;
mod traits;

/// Callback run after a CPU write into the IO page (`$FF00..=$FF7F`) or IE
/// (`$FFFF`), with the address and the written value.
pub type IoWriteHook = Box<dyn FnMut(u16, u8)>;

/// Flat 64 KiB DMG bus.
///
/// Every register the CPU can read is mirrored into `memory`, so reads (and
/// `Index`) are plain array lookups. Side effects happen on writes and in
/// `tick`.
pub struct GameBoyBus {
    pub(crate) memory: Box<[u8; MEMORY_SIZE]>,
    pub(crate) serial: Serial,
    /// Timer / divider state.
    timer: Timer,
    /// Position within the current frame in dots (T-cycles), used to derive
    /// LY and the LCD mode.
    lcd_dots: u32,
    /// Internal "STAT interrupt line" latch used to model STAT's edge-triggered
    /// interrupt behaviour. This tracks the logically ORed state of all enabled
    /// STAT interrupt sources between calls to `tick`.
    stat_irq_line: bool,
    /// Number of VBlank edges seen so far.
    frames: u64,
    io_hooks: Vec<IoWriteHook>,
}

impl Default for GameBoyBus {
    fn default() -> Self {
        Self::new(RamInit::default())
    }
}

impl fmt::Debug for GameBoyBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameBoyBus")
            .field("timer", &self.timer)
            .field("serial", &self.serial)
            .field("lcd_dots", &self.lcd_dots)
            .field("frames", &self.frames)
            .field("io_hooks", &self.io_hooks.len())
            .finish_non_exhaustive()
    }
}

impl GameBoyBus {
    pub fn new(ram_init: RamInit) -> Self {
        let mut bus = Self {
            memory: Box::new([0; MEMORY_SIZE]),
            serial: Serial::default(),
            timer: Timer::new(),
            lcd_dots: 0,
            stat_irq_line: false,
            frames: 0,
            io_hooks: Vec::new(),
        };
        bus.init_internal_ram(ram_init);
        bus.apply_dmg_initial_io_state();
        bus
    }

    /// Copy a ROM-only cartridge image into `0x0000..=0x7FFF`.
    ///
    /// Mapper cartridges are not emulated, so images that do not fit the
    /// ROM window are rejected.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > ROM_WINDOW_SIZE {
            bail!(
                "ROM image is {} bytes; at most {} bytes fit the cartridge ROM window",
                rom.len(),
                ROM_WINDOW_SIZE
            );
        }
        self.memory[..rom.len()].copy_from_slice(rom);
        self.memory[rom.len()..ROM_WINDOW_SIZE].fill(0xFF);
        Ok(())
    }

    /// Register a hook run after every write into the IO page or IE.
    pub fn on_io_write(&mut self, hook: impl FnMut(u16, u8) + 'static) {
        self.io_hooks.push(Box::new(hook));
    }

    /// Bytes transmitted over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.serial.output
    }

    /// Number of VBlank periods entered since power-on.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Index<u16> for GameBoyBus {
    type Output = u8;

    fn index(&self, addr: u16) -> &u8 {
        &self.memory[addr as usize]
    }
}
