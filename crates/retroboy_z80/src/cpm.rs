//! Bare CP/M environment for running `.COM` test programs (zexdoc, zexall
//! and friends).
//!
//! Programs are loaded at `0x0100`. The BDOS entry point at `0x0005` is
//! trapped: console output functions 2 and 9 are captured, then a `RET`
//! placed there returns to the caller. A jump to `0x0000` (warm boot) ends
//! the run.

use std::ops::Index;

use anyhow::{bail, Result};
use retroboy_common::{LogTrace, TraceLog};
use typed_builder::TypedBuilder;

use crate::cpu::{Bus, Cpu};

/// Load address of a `.COM` image.
pub const TPA_START: u16 = 0x0100;
/// BDOS entry trapped by the machine.
pub const BDOS_ENTRY: u16 = 0x0005;
/// Top of the transient program area, published at `0x0006`.
pub const TPA_TOP: u16 = 0xFE00;

const BDOS_CONSOLE_OUTPUT: u8 = 2;
const BDOS_PRINT_STRING: u8 = 9;

const OPCODE_HALT: u8 = 0x76;
const OPCODE_RET: u8 = 0xC9;

#[derive(Clone, Debug, Default, PartialEq, Eq, TypedBuilder)]
pub struct CpmConfig {
    /// Record every executed instruction into the machine's trace log.
    #[builder(default)]
    pub trace: bool,
    /// Stop recording after this many entries.
    #[builder(default, setter(strip_option))]
    pub trace_limit: Option<usize>,
}

/// Flat 64 KiB RAM with the console the BDOS trap writes into.
pub struct CpmBus {
    memory: Box<[u8; 0x10000]>,
    console: Vec<u8>,
}

impl Default for CpmBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CpmBus {
    pub fn new() -> Self {
        Self {
            memory: Box::new([0; 0x10000]),
            console: Vec::new(),
        }
    }

    pub fn console(&self) -> &[u8] {
        &self.console
    }
}

impl Index<u16> for CpmBus {
    type Output = u8;

    fn index(&self, addr: u16) -> &u8 {
        &self.memory[addr as usize]
    }
}

impl Bus for CpmBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

pub struct CpmMachine {
    pub cpu: Cpu,
    pub bus: CpmBus,
    trace_enabled: bool,
    trace: TraceLog,
    log_trace: LogTrace,
    finished: bool,
    total_cycles: u64,
}

impl Default for CpmMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CpmMachine {
    pub fn new() -> Self {
        Self::with_config(CpmConfig::default())
    }

    pub fn with_config(config: CpmConfig) -> Self {
        let trace = match config.trace_limit {
            Some(limit) => TraceLog::with_limit(limit),
            None => TraceLog::new(),
        };
        Self {
            cpu: Cpu::new(),
            bus: CpmBus::new(),
            trace_enabled: config.trace,
            trace,
            log_trace: LogTrace::default(),
            finished: false,
            total_cycles: 0,
        }
    }

    /// Load a `.COM` image and point the CPU at it.
    ///
    /// The stack starts below `TPA_TOP` with `0x0000` pushed, so a final
    /// `RET` from the program also ends the run.
    pub fn load_com(&mut self, image: &[u8]) -> Result<()> {
        let start = TPA_START as usize;
        let top = TPA_TOP as usize;
        if image.len() > top - start {
            bail!(
                "COM image is {} bytes; at most {} fit in the TPA",
                image.len(),
                top - start
            );
        }

        let memory = &mut self.bus.memory;
        memory[start..start + image.len()].copy_from_slice(image);
        memory[0x0000] = OPCODE_HALT;
        memory[BDOS_ENTRY as usize] = OPCODE_RET;
        let [lo, hi] = TPA_TOP.to_le_bytes();
        memory[0x0006] = lo;
        memory[0x0007] = hi;
        // Return address 0x0000 on top of the stack.
        let sp = TPA_TOP - 2;
        memory[sp as usize] = 0x00;
        memory[sp as usize + 1] = 0x00;

        self.cpu.reset();
        self.cpu.regs.pc = TPA_START;
        self.cpu.regs.sp = sp;

        self.bus.console.clear();
        self.finished = false;
        self.total_cycles = 0;
        log::info!("CP/M: loaded {} byte COM image", image.len());
        Ok(())
    }

    /// Execute one instruction, servicing the BDOS trap first when PC sits
    /// on it. Returns the T-cycles consumed; zero once the program is done.
    pub fn step(&mut self) -> u32 {
        if self.finished {
            return 0;
        }
        match self.cpu.regs.pc {
            0x0000 => {
                self.finished = true;
                log::info!("CP/M: warm boot after {} T-cycles", self.total_cycles);
                return 0;
            }
            BDOS_ENTRY => self.bdos_call(),
            _ => {}
        }

        let mut cycles = if self.trace_enabled {
            self.cpu.step_traced(&mut self.bus, &mut self.trace)
        } else {
            self.cpu.step_traced(&mut self.bus, &mut self.log_trace)
        };
        self.bus.tick(cycles);

        if let Some(entry) = self.cpu.handle_interrupts(&mut self.bus) {
            self.bus.tick(entry);
            cycles += entry;
        }

        self.total_cycles += u64::from(cycles);
        cycles
    }

    /// Run until the program exits or `max_cycles` T-cycles have elapsed.
    /// Returns whether the program finished.
    pub fn run(&mut self, max_cycles: u64) -> bool {
        while !self.finished && self.total_cycles < max_cycles {
            self.step();
        }
        self.finished
    }

    fn bdos_call(&mut self) {
        let regs = &self.cpu.regs;
        match regs.c {
            BDOS_CONSOLE_OUTPUT => self.bus.console.push(regs.e),
            BDOS_PRINT_STRING => {
                let mut addr = regs.de();
                loop {
                    let byte = self.bus.memory[addr as usize];
                    if byte == b'$' {
                        break;
                    }
                    self.bus.console.push(byte);
                    addr = addr.wrapping_add(1);
                    // An unterminated string would otherwise wrap forever.
                    if addr == regs.de() {
                        break;
                    }
                }
            }
            function => log::warn!("CP/M: unsupported BDOS function {function}"),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text written through the BDOS console functions.
    pub fn console_output(&self) -> &[u8] {
        self.bus.console()
    }

    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }
}
