use crate::cpu::{Bus, Cpu, Flag, Reg16, Reg8};

impl Cpu {
    /// `LD r,n`. For `(IX+d)` the displacement precedes the immediate.
    pub(in crate::cpu) fn exec_ld_imm8<B: Bus>(&mut self, bus: &mut B, reg: Reg8) {
        if reg.is_indirect() {
            let addr = self.indirect_addr(bus);
            let value = self.fetch8(bus);
            bus.write8(addr, value);
        } else {
            let value = self.fetch8(bus);
            self.write_reg8(bus, reg, value);
        }
    }

    /// `LD (nn),rr`, low byte first.
    pub(in crate::cpu) fn exec_ld_abs_rp<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let addr = self.fetch16(bus);
        let value = self.reg16(reg);
        self.write16(bus, addr, value);
    }

    pub(in crate::cpu) fn exec_ld_rp_abs<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let addr = self.fetch16(bus);
        let value = self.read16(bus, addr);
        self.set_reg16(reg, value);
    }

    /// `LD A,I` / `LD A,R`: P/V reflects IFF2.
    pub(in crate::cpu) fn exec_ld_a_special(&mut self, value: u8) {
        self.regs.a = value;
        self.set_flag(Flag::S, value & 0x80 != 0);
        self.set_flag(Flag::Z, value == 0);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::PV, self.iff2);
    }

    /// `EX (SP),HL` (or IX/IY).
    pub(in crate::cpu) fn exec_ex_sp_hl<B: Bus>(&mut self, bus: &mut B) {
        let sp = self.regs.sp;
        let from_stack = self.read16(bus, sp);
        let value = self.hl_like();
        self.write16(bus, sp, value);
        self.set_hl_like(from_stack);
    }
}
