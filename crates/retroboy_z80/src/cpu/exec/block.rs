use crate::cpu::table::{BlockOp, BLOCK_REPEAT_EXTRA};
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// LDI/LDD/CPI/CPD/INI/IND/OUTI/OUTD and their repeating forms.
    ///
    /// A repeating form that has not finished rewinds PC onto itself, so the
    /// next `step` executes it again; each repeat costs the extra 5 T-cycles.
    pub(in crate::cpu) fn exec_block<B: Bus>(
        &mut self,
        bus: &mut B,
        op: BlockOp,
        increment: bool,
        repeat: bool,
    ) {
        let delta: i16 = if increment { 1 } else { -1 };
        let hl = self.regs.hl();

        let again = match op {
            BlockOp::Ld => {
                let value = bus.read8(hl);
                let de = self.regs.de();
                bus.write8(de, value);
                self.regs.set_hl(hl.wrapping_add_signed(delta));
                self.regs.set_de(de.wrapping_add_signed(delta));
                let bc = self.regs.bc().wrapping_sub(1);
                self.regs.set_bc(bc);

                self.set_flag(Flag::H, false);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::PV, bc != 0);
                bc != 0
            }
            BlockOp::Cp => {
                let value = bus.read8(hl);
                let a = self.regs.a;
                let result = a.wrapping_sub(value);
                self.regs.set_hl(hl.wrapping_add_signed(delta));
                let bc = self.regs.bc().wrapping_sub(1);
                self.regs.set_bc(bc);

                // C is kept.
                self.set_flag(Flag::S, result & 0x80 != 0);
                self.set_flag(Flag::Z, result == 0);
                self.set_flag(Flag::H, (a ^ value ^ result) & 0x10 != 0);
                self.set_flag(Flag::PV, bc != 0);
                self.set_flag(Flag::N, true);
                bc != 0 && result != 0
            }
            BlockOp::In => {
                let value = bus.port_in(self.regs.bc());
                bus.write8(hl, value);
                self.regs.set_hl(hl.wrapping_add_signed(delta));
                self.regs.b = self.regs.b.wrapping_sub(1);
                self.block_io_flags();
                self.regs.b != 0
            }
            BlockOp::Out => {
                let value = bus.read8(hl);
                // B is decremented before it reaches the port address.
                self.regs.b = self.regs.b.wrapping_sub(1);
                bus.port_out(self.regs.bc(), value);
                self.regs.set_hl(hl.wrapping_add_signed(delta));
                self.block_io_flags();
                self.regs.b != 0
            }
        };

        if repeat && again {
            self.regs.pc = self.regs.pc.wrapping_sub(2);
            self.extra_cycles += BLOCK_REPEAT_EXTRA;
        }
    }

    /// Block I/O flags: Z and S from the decremented B, N set. The rest is
    /// left as it was.
    fn block_io_flags(&mut self) {
        let b = self.regs.b;
        self.set_flag(Flag::Z, b == 0);
        self.set_flag(Flag::S, b & 0x80 != 0);
        self.set_flag(Flag::N, true);
    }
}
