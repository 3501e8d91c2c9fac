use crate::cpu::table::Indirect;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// Resolve the address of an `(rr)` operand, applying the HL
    /// post-increment/decrement of `(HL+)` and `(HL-)`.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::Bc => self.regs.bc(),
            Indirect::De => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        self.regs.a = bus.read8(addr);
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        let [hi, lo] = self.regs.sp.to_be_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
    }

    pub(super) fn exec_ldh_a8_a<B: Bus>(&mut self, bus: &mut B) {
        let offset = self.fetch8(bus) as u16;
        bus.write8(0xFF00 | offset, self.regs.a);
    }

    pub(super) fn exec_ldh_a_a8<B: Bus>(&mut self, bus: &mut B) {
        let offset = self.fetch8(bus) as u16;
        self.regs.a = bus.read8(0xFF00 | offset);
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        let value = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(value);
    }
}
