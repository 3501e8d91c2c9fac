//! Game Boy CPU core (SM83 / LR35902).
//!
//! Instructions are decoded through per-instance opcode tables into `Op`
//! tags and executed by a single `match`. `step` returns the T-cycles the
//! instruction took; the caller advances the bus and then asks
//! `handle_interrupts` whether to vector.

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

#[cfg(test)]
mod tests;

use retroboy_common::InstructionBytes;

use interrupts::ImeSchedule;

pub use bus::{Bus, IE_ADDR, IF_ADDR, P1_ADDR};
pub use init::BootState;
pub use interrupts::{Interrupts, INTERRUPT_ENTRY_CYCLES};
pub use regs::{Cond, Flag, Reg16, Reg8, Registers, F_UNUSED_MASK};
pub use step::IDLE_STEP_CYCLES;
pub use table::{AluOp, Indirect, Op, OpcodeEntry, OpcodeTable, ShiftOp};

#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. While `stopped` is true the CPU executes
    /// nothing and resumes once a joypad line reads low in P1 ($FF00) or a
    /// joypad interrupt becomes pending.
    stopped: bool,
    halt_bug: bool,
    ime_schedule: ImeSchedule,
    boot: BootState,
    table: Box<OpcodeTable>,
    /// Runtime cycle delta of the current instruction (taken branches).
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
