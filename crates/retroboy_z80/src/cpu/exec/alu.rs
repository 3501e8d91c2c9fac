use crate::cpu::alu::parity_even;
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    pub(in crate::cpu) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::H, true);
        self.set_flag(Flag::N, true);
    }

    pub(in crate::cpu) fn exec_scf(&mut self) {
        self.set_flag(Flag::C, true);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
    }

    /// CCF: H takes the old carry.
    pub(in crate::cpu) fn exec_ccf(&mut self) {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::H, carry);
        self.set_flag(Flag::C, !carry);
        self.set_flag(Flag::N, false);
    }

    /// RRD: rotate the low nibbles of A and (HL) with the high nibble of
    /// (HL) one digit to the right.
    pub(in crate::cpu) fn exec_rrd<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.regs.hl();
        let m = bus.read8(addr);
        let a = self.regs.a;
        bus.write8(addr, (a << 4) | (m >> 4));
        self.regs.a = (a & 0xF0) | (m & 0x0F);
        self.digit_rotate_flags();
    }

    /// RLD: the same rotation, one digit to the left.
    pub(in crate::cpu) fn exec_rld<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.regs.hl();
        let m = bus.read8(addr);
        let a = self.regs.a;
        bus.write8(addr, (m << 4) | (a & 0x0F));
        self.regs.a = (a & 0xF0) | (m >> 4);
        self.digit_rotate_flags();
    }

    fn digit_rotate_flags(&mut self) {
        let a = self.regs.a;
        self.set_flag(Flag::S, a & 0x80 != 0);
        self.set_flag(Flag::Z, a == 0);
        self.set_flag(Flag::PV, parity_even(a));
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
    }
}
