use crate::cpu::Cpu;

impl Cpu {
    /// HALT: PC already points past the opcode; the CPU idles until an
    /// interrupt is accepted.
    pub(in crate::cpu) fn exec_halt(&mut self) {
        self.halted = true;
    }

    pub(in crate::cpu) fn exec_di(&mut self) {
        self.iff1 = false;
        self.iff2 = false;
    }

    /// EI: both flip-flops are set now, but a maskable interrupt is only
    /// accepted after the next instruction.
    pub(in crate::cpu) fn exec_ei(&mut self) {
        self.iff1 = true;
        self.iff2 = true;
        self.ei_shadow = true;
    }

    /// Opcode holes act as a no-op: nothing changes beyond the fetch.
    pub(in crate::cpu) fn exec_invalid(&mut self, opcode: u8) {
        self.invalid_opcodes += 1;
        log::warn!(
            "Z80 CPU: invalid opcode 0x{:02X} at 0x{:04X} (bytes {}) \
             AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
            opcode,
            self.instr_addr,
            self.fetched,
            self.regs.af(),
            self.regs.bc(),
            self.regs.de(),
            self.regs.hl(),
            self.regs.sp,
        );
    }
}
