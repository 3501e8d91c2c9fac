use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let value = self.regs.get16(reg);
        self.push_u16(bus, value);
    }

    /// POP rr. `POP AF` goes through `set16`, which keeps F's low nibble zero.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let value = self.pop_u16(bus);
        self.regs.set16(reg, value);
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = vector as u16;
    }

    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        // Unlike EI, RETI enables IME without delay.
        self.ime = true;
        self.cancel_ime_schedule();
        self.regs.pc = self.pop_u16(bus);
    }
}
