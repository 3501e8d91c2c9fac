use anyhow::Result;
use retroboy_common::{LogTrace, TraceLog};

use crate::cpu::{Bus, Cpu};

use super::{GameBoyBus, GameBoyConfig};

/// T-cycles in one DMG frame (456 dots x 154 lines).
pub const CYCLES_PER_FRAME: u32 = 70_224;

/// High-level Game Boy machine.
///
/// Holds the CPU core and the bus, and sequences them: one instruction,
/// then the peripherals catch up, then the interrupt check.
pub struct GameBoy {
    pub cpu: Cpu,
    pub bus: GameBoyBus,
    config: GameBoyConfig,
    trace: TraceLog,
    /// Used when `trace` is off; emits entries only under `RUST_LOG=retroboy::trace=trace`.
    log_trace: LogTrace,
    /// Cycles the last `step_frame` ran past the frame boundary; the next
    /// frame is shortened by the same amount.
    frame_overshoot: u32,
    total_cycles: u64,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(GameBoyConfig::default())
    }

    pub fn with_config(config: GameBoyConfig) -> Self {
        let trace = match config.trace_limit {
            Some(limit) => TraceLog::with_limit(limit),
            None => TraceLog::new(),
        };
        Self {
            cpu: Cpu::with_boot_state(config.boot_state),
            bus: GameBoyBus::new(config.ram_init),
            config,
            trace,
            log_trace: LogTrace::default(),
            frame_overshoot: 0,
            total_cycles: 0,
        }
    }

    /// Power-cycle the machine. The loaded ROM is kept.
    pub fn reset(&mut self) {
        let rom = self.bus.memory[..super::ROM_WINDOW_SIZE].to_vec();
        self.cpu.reset();
        self.bus = GameBoyBus::new(self.config.ram_init);
        self.bus.memory[..super::ROM_WINDOW_SIZE].copy_from_slice(&rom);
        self.trace = match self.config.trace_limit {
            Some(limit) => TraceLog::with_limit(limit),
            None => TraceLog::new(),
        };
        self.frame_overshoot = 0;
        self.total_cycles = 0;
    }

    /// Load a ROM image into the cartridge ROM area.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.bus.load_rom(rom)?;
        // PC is already initialised to 0x0100 by the simulated boot state.
        log::info!("GB: loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Execute one instruction (or one idle HALT/STOP step) plus any
    /// interrupt dispatch that follows it. Returns the T-cycles consumed.
    pub fn step(&mut self) -> u32 {
        let mut cycles = if self.config.trace {
            self.cpu.step_traced(&mut self.bus, &mut self.trace)
        } else {
            self.cpu.step_traced(&mut self.bus, &mut self.log_trace)
        };

        // STOP halts the system clock, so the peripherals do not advance.
        if !self.cpu.is_stopped() {
            self.bus.tick(cycles);
        }

        if let Some(entry) = self.cpu.handle_interrupts(&mut self.bus) {
            self.bus.tick(entry);
            cycles += entry;
        }

        self.total_cycles += u64::from(cycles);
        cycles
    }

    /// Step the machine for one frame worth of time.
    ///
    /// This advances the CPU until we have consumed one DMG frame's worth of
    /// time (70224 T-cycles). Returns the cycles actually run.
    pub fn step_frame(&mut self) -> u64 {
        let budget = CYCLES_PER_FRAME.saturating_sub(self.frame_overshoot);
        let mut ran = 0u32;
        while ran < budget {
            ran += self.step();
        }
        self.frame_overshoot = ran - budget;
        u64::from(ran)
    }

    /// Bytes the program sent over the serial port.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial_output()
    }

    /// Instructions recorded while `trace` is enabled in the config.
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    pub fn config(&self) -> &GameBoyConfig {
        &self.config
    }

    /// T-cycles run since power-on or the last reset.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }
}
