use crate::cpu::{Bus, Cpu, Flag, IndexMode, Reg8};

impl Cpu {
    /// `OUT (n),A`: A supplies the upper half of the port address.
    pub(in crate::cpu) fn exec_out_imm_a<B: Bus>(&mut self, bus: &mut B) {
        let n = self.fetch8(bus);
        let port = u16::from_be_bytes([self.regs.a, n]);
        bus.port_out(port, self.regs.a);
    }

    /// `IN A,(n)`: no flags change.
    pub(in crate::cpu) fn exec_in_a_imm<B: Bus>(&mut self, bus: &mut B) {
        let n = self.fetch8(bus);
        let port = u16::from_be_bytes([self.regs.a, n]);
        self.regs.a = bus.port_in(port);
    }

    /// `IN r,(C)`, or the flags-only `IN (C)` when `reg` is `None`.
    pub(in crate::cpu) fn exec_in_c<B: Bus>(&mut self, bus: &mut B, reg: Option<Reg8>) {
        let value = bus.port_in(self.regs.bc());
        self.set_szp(value);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        if let Some(reg) = reg {
            self.write_reg8_as(bus, reg, IndexMode::Hl, value);
        }
    }

    /// `OUT (C),r`, or `OUT (C),0` when `reg` is `None`.
    pub(in crate::cpu) fn exec_out_c<B: Bus>(&mut self, bus: &mut B, reg: Option<Reg8>) {
        let value = match reg {
            Some(reg) => self.read_reg8_as(bus, reg, IndexMode::Hl),
            None => 0,
        };
        bus.port_out(self.regs.bc(), value);
    }
}
