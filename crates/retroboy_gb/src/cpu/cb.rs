use super::table::ShiftOp;
use super::{Bus, Cpu, Flag, Reg8};

impl Cpu {
    /// Rotate/shift `value` and return the result together with the bit
    /// shifted out. RL/RR rotate through the current carry flag.
    pub(super) fn rotate(&self, op: ShiftOp, value: u8) -> (u8, bool) {
        let carry_in = self.get_flag(Flag::C);
        match op {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            ShiftOp::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        }
    }

    /// CB rotates and shifts: Z from the result, N and H cleared, C from
    /// the outgoing bit (always cleared by SWAP).
    pub(super) fn exec_shift<B: Bus>(&mut self, bus: &mut B, op: ShiftOp, target: Reg8) {
        let value = self.read_reg8(bus, target);
        let (result, carry) = self.rotate(op, value);

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry);

        self.write_reg8(bus, target, result);
    }

    /// RLCA/RRCA/RLA/RRA: same rotation as the CB forms but Z is always
    /// cleared.
    pub(super) fn exec_rotate_a(&mut self, op: ShiftOp) {
        let (result, carry) = self.rotate(op, self.regs.a);
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::C, carry);
    }

    pub(super) fn exec_bit<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Reg8) {
        let value = self.read_reg8(bus, target);
        // Preserve C, set H=1, N=0.
        self.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
    }

    pub(super) fn exec_res<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Reg8) {
        let value = self.read_reg8(bus, target);
        self.write_reg8(bus, target, value & !(1 << bit));
    }

    pub(super) fn exec_set<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Reg8) {
        let value = self.read_reg8(bus, target);
        self.write_reg8(bus, target, value | (1 << bit));
    }
}
