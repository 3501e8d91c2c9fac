use retroboy_common::InstructionBytes;

use super::table::OpcodeTable;
use super::{Cpu, IndexMode, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in its power-on state.
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            iff1: false,
            iff2: false,
            im: 0,
            halted: false,
            ei_shadow: false,
            mode: IndexMode::Hl,
            index_addr: None,
            table: Box::new(OpcodeTable::new()),
            extra_cycles: 0,
            instr_addr: 0,
            fetched: InstructionBytes::default(),
            invalid_opcodes: 0,
        };
        cpu.apply_reset_state();
        cpu
    }

    /// Assert /RESET. The opcode table is kept.
    pub fn reset(&mut self) {
        self.halted = false;
        self.ei_shadow = false;
        self.mode = IndexMode::Hl;
        self.index_addr = None;
        self.extra_cycles = 0;
        self.instr_addr = 0;
        self.fetched.clear();
        self.invalid_opcodes = 0;
        self.apply_reset_state();
    }

    /// PC, I, R, the interrupt flip-flops and the mode are cleared by reset.
    /// The rest of the register file is undefined on hardware; AF and SP
    /// start at 0xFFFF like most documented boards.
    fn apply_reset_state(&mut self) {
        self.regs = Registers::default();
        self.regs.set_af(0xFFFF);
        self.regs.sp = 0xFFFF;
        self.regs.pc = 0x0000;
        self.iff1 = false;
        self.iff2 = false;
        self.im = 0;
    }
}
