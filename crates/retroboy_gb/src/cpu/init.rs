use retroboy_common::InstructionBytes;

use super::interrupts::ImeSchedule;
use super::table::OpcodeTable;
use super::{Cpu, Registers};

/// Register state a CPU starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BootState {
    /// State left behind by the DMG boot ROM at `0x0100`.
    #[default]
    Dmg,
    /// Every register zero, PC at `0x0000`.
    Zeroed,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_boot_state(BootState::Dmg)
    }

    pub fn with_boot_state(boot: BootState) -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            halt_bug: false,
            ime_schedule: ImeSchedule::Idle,
            boot,
            table: Box::new(OpcodeTable::new()),
            extra_cycles: 0,
            instr_addr: 0,
            fetched: InstructionBytes::default(),
            invalid_opcodes: 0,
        };
        cpu.apply_boot_state();
        cpu
    }

    /// Reset the CPU to the boot state it was created with.
    ///
    /// The opcode table is kept; it never changes after construction.
    pub fn reset(&mut self) {
        self.ime = false;
        self.halted = false;
        self.stopped = false;
        self.halt_bug = false;
        self.cancel_ime_schedule();
        self.extra_cycles = 0;
        self.instr_addr = 0;
        self.fetched.clear();
        self.invalid_opcodes = 0;
        self.apply_boot_state();
    }

    fn apply_boot_state(&mut self) {
        match self.boot {
            BootState::Dmg => self.apply_dmg_boot_state(),
            BootState::Zeroed => self.regs = Registers::default(),
        }
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code.
    ///
    /// These values follow common emulator conventions and are based on
    /// hardware tests (as documented in Pan Docs).
    fn apply_dmg_boot_state(&mut self) {
        // Registers (DMG mode).
        self.regs.a = 0x01;
        self.regs.f = 0xB0; // Z, N, H, C = 1,0,1,1 (upper nibble 1011_0000)
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;

        // Per Pan Docs, IME is clear when control is handed to the cartridge
        // at 0x0100. The game (or test ROM) is responsible for enabling
        // interrupts via EI/RETI as needed.
        self.ime = false;
    }
}
