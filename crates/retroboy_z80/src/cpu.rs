//! Zilog Z80 CPU core.
//!
//! Decoding works like the Game Boy core: per-instance opcode tables map
//! each opcode (after any CB/ED/DD/FD prefixes) to an `Op` tag that a single
//! `match` executes. An index prefix only sets the `IndexMode` for the
//! instruction; HL-based operands are resolved against it at execution.
//! `step` returns T-cycles and never advances the bus itself; the driver
//! ticks the bus and then calls `handle_interrupts`.

mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;
mod table;


use retroboy_common::InstructionBytes;

pub use bus::Bus;
pub use interrupts::{IM1_VECTOR, IM_0_1_CYCLES, IM_2_CYCLES, NMI_CYCLES, NMI_VECTOR};
pub use regs::{AltRegisters, Cond, Flag, IndexMode, Reg16, Reg8, Registers, F_UNUSED_MASK};
pub use step::IDLE_STEP_CYCLES;
pub use table::{AluOp, BlockOp, Mnemonic, Op, OpcodeEntry, OpcodeTable, ShiftOp};

#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub iff1: bool,
    pub iff2: bool,
    /// Interrupt mode selected by `IM 0/1/2`.
    pub im: u8,
    pub halted: bool,
    /// Set by EI; maskable interrupts are not accepted until the following
    /// instruction has executed.
    ei_shadow: bool,
    /// Register substituted for HL by the current instruction's prefix.
    mode: IndexMode,
    /// Effective `(IX+d)`/`(IY+d)` address, once the displacement has been
    /// fetched for the current instruction.
    index_addr: Option<u16>,
    table: Box<OpcodeTable>,
    /// Runtime cycle delta of the current instruction.
    extra_cycles: u32,
    instr_addr: u16,
    fetched: InstructionBytes,
    invalid_opcodes: u64,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        (self.regs.f & flag.mask()) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        if value {
            self.regs.f |= flag.mask();
        } else {
            self.regs.f &= !flag.mask();
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    /// Decoded opcode tables owned by this CPU.
    #[inline]
    pub fn opcode_table(&self) -> &OpcodeTable {
        &self.table
    }
}
