use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(in crate::cpu) fn exec_push<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let value = self.reg16(reg);
        self.push_u16(bus, value);
    }

    /// POP rr. `POP AF` goes through `set_af`, which clears F's unused bits.
    pub(in crate::cpu) fn exec_pop<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let value = self.pop_u16(bus);
        self.set_reg16(reg, value);
    }

    pub(in crate::cpu) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = u16::from(vector);
    }

    /// RETN and RETI: return and restore IFF1 from IFF2.
    pub(in crate::cpu) fn exec_retn<B: Bus>(&mut self, bus: &mut B) {
        self.iff1 = self.iff2;
        self.regs.pc = self.pop_u16(bus);
    }
}
