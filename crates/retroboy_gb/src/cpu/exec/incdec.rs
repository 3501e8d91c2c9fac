use crate::cpu::{Bus, Cpu, Reg16, Reg8};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, target: Reg8) {
        let value = self.read_reg8(bus, target);
        let result = self.alu_inc8(value);
        self.write_reg8(bus, target, result);
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, target: Reg8) {
        let value = self.read_reg8(bus, target);
        let result = self.alu_dec8(value);
        self.write_reg8(bus, target, result);
    }

    /// 16-bit INC/DEC never touch the flags.
    pub(super) fn exec_inc16(&mut self, reg: Reg16) {
        let value = self.regs.get16(reg).wrapping_add(1);
        self.regs.set16(reg, value);
    }

    pub(super) fn exec_dec16(&mut self, reg: Reg16) {
        let value = self.regs.get16(reg).wrapping_sub(1);
        self.regs.set16(reg, value);
    }
}
