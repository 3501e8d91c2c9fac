use retroboy_common::{NullTrace, TraceEntry, TraceSink};

use super::bus::P1_ADDR;
use super::table::Op;
use super::{Bus, Cpu};

/// Cost reported for a step in which the CPU sits in HALT or STOP.
pub const IDLE_STEP_CYCLES: u32 = 4;

impl Cpu {
    /// Execute a single instruction and return the number of T-cycles taken.
    ///
    /// The caller is expected to advance the bus by the returned cycles and
    /// then give [`Cpu::handle_interrupts`] a chance to dispatch.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.step_traced(bus, &mut NullTrace)
    }

    /// Like [`Cpu::step`], reporting the executed instruction to `trace`.
    pub fn step_traced<B: Bus, T: TraceSink>(&mut self, bus: &mut B, trace: &mut T) -> u32 {
        self.extra_cycles = 0;

        if self.halted {
            // In HALT the CPU idles until the interrupt check wakes it.
            return IDLE_STEP_CYCLES;
        }

        // STOP is exited once a joypad line (P10-P13) reads low. The step
        // that observes the exit is still an idle one.
        if self.stopped {
            let p1 = bus.read8(P1_ADDR);
            if (p1 & 0x0F) != 0x0F {
                self.stopped = false;
            }
            return IDLE_STEP_CYCLES;
        }

        self.instr_addr = self.regs.pc;
        self.fetched.clear();

        let opcode = self.fetch8(bus);
        let mut entry = self.table.primary(opcode);
        let mut cycles = entry.cycles;
        if entry.op == Op::PrefixCb {
            let cb = self.fetch8(bus);
            entry = self.table.cb(cb);
            cycles += entry.cycles;
        }

        self.execute(bus, entry.op);

        cycles += self.extra_cycles;
        self.extra_cycles = 0;

        if trace.enabled() {
            trace.record(TraceEntry {
                address: self.instr_addr,
                bytes: self.fetched,
                mnemonic: entry.op.to_string(),
            });
        }

        self.apply_ime_delay();
        cycles
    }

    /// Arm the HALT bug: the next opcode fetch will not advance PC.
    ///
    /// HALT arms it automatically; this lets a driver reproduce the
    /// condition from outside.
    pub fn latch_halt_bug(&mut self) {
        self.halt_bug = true;
    }

    #[inline]
    pub fn halt_bug_latched(&self) -> bool {
        self.halt_bug
    }

    /// Address of the most recently started instruction.
    #[inline]
    pub fn instruction_address(&self) -> u16 {
        self.instr_addr
    }

    /// Number of opcode holes executed since power-on or the last reset.
    #[inline]
    pub fn invalid_opcode_count(&self) -> u64 {
        self.invalid_opcodes
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
