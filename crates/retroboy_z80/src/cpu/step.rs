use retroboy_common::{NullTrace, TraceEntry, TraceSink};

use super::table::Op;
use super::{Bus, Cpu, IndexMode};

/// Cost reported for a step in which the CPU sits in HALT.
pub const IDLE_STEP_CYCLES: u32 = 4;

const PREFIX_IX: u8 = 0xDD;
const PREFIX_IY: u8 = 0xFD;

impl Cpu {
    /// Execute a single instruction and return the number of T-cycles taken.
    ///
    /// The caller is expected to advance the bus by the returned cycles and
    /// then give [`Cpu::handle_interrupts`] a chance to vector.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.step_traced(bus, &mut NullTrace)
    }

    /// Like [`Cpu::step`], reporting the executed instruction to `trace`.
    pub fn step_traced<B: Bus, T: TraceSink>(&mut self, bus: &mut B, trace: &mut T) -> u32 {
        self.extra_cycles = 0;
        self.ei_shadow = false;

        if self.halted {
            // HALT keeps issuing NOP refresh cycles.
            self.regs.bump_r();
            return IDLE_STEP_CYCLES;
        }

        self.instr_addr = self.regs.pc;
        self.fetched.clear();
        self.mode = IndexMode::Hl;
        self.index_addr = None;

        let opcode = self.fetch_opcode(bus);
        let mut entry = self.table.primary(opcode);
        let mut cycles = entry.cycles;

        loop {
            entry = match entry.op {
                Op::PrefixIx | Op::PrefixIy => {
                    // A run of index prefixes: each one is its own 4-cycle
                    // step and only the last applies.
                    let next = bus.read8(self.regs.pc);
                    if next == PREFIX_IX || next == PREFIX_IY {
                        break;
                    }
                    self.mode = if entry.op == Op::PrefixIx {
                        IndexMode::Ix
                    } else {
                        IndexMode::Iy
                    };
                    let opcode = self.fetch_opcode(bus);
                    self.table.index(opcode)
                }
                Op::PrefixEd => {
                    // ED discards an index prefix in front of it.
                    self.mode = IndexMode::Hl;
                    let opcode = self.fetch_opcode(bus);
                    self.table.ed(opcode)
                }
                Op::PrefixCb => {
                    let opcode = self.fetch_opcode(bus);
                    self.table.cb(opcode)
                }
                Op::PrefixIndexCb => {
                    // DD CB d op: neither d nor op is an M1 fetch.
                    let d = self.fetch8(bus) as i8;
                    let opcode = self.fetch8(bus);
                    self.index_addr = Some(self.hl_like().wrapping_add_signed(i16::from(d)));
                    self.table.index_cb(opcode)
                }
                _ => break,
            };
            cycles += entry.cycles;
        }

        self.execute(bus, entry.op);

        cycles += self.extra_cycles;
        self.extra_cycles = 0;

        if trace.enabled() {
            trace.record(TraceEntry {
                address: self.instr_addr,
                bytes: self.fetched,
                mnemonic: entry.op.mnemonic(self.mode).to_string(),
            });
        }

        self.mode = IndexMode::Hl;
        self.index_addr = None;
        cycles
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

    /// Whether interrupts are held off until after the next instruction.
    #[inline]
    pub fn in_ei_shadow(&self) -> bool {
        self.ei_shadow
    }
}
