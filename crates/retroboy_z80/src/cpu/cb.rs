use super::table::ShiftOp;
use super::{Bus, Cpu, Flag, IndexMode, Reg8};

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
            ShiftOp::Sll => ((value << 1) | 0x01, value & 0x80 != 0),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        }
    }

    /// Flags of the CB rotates: S, Z and parity from the result, H and N
    /// cleared, C from the outgoing bit.
    fn shift_result(&mut self, op: ShiftOp, value: u8) -> u8 {
        let (result, carry) = self.rotate(op, value);
        self.clear_flags();
        self.set_szp(result);
        self.set_flag(Flag::C, carry);
        result
    }

    pub(super) fn exec_shift<B: Bus>(&mut self, bus: &mut B, op: ShiftOp, target: Reg8) {
        let value = self.read_reg8(bus, target);
        let result = self.shift_result(op, value);
        self.write_reg8(bus, target, result);
    }

    /// RLCA/RRCA/RLA/RRA: H and N cleared, S, Z and P/V kept.
    pub(super) fn exec_rotate_a(&mut self, op: ShiftOp) {
        let (result, carry) = self.rotate(op, self.regs.a);
        self.regs.a = result;

        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::C, carry);
    }

    /// BIT flags: Z (and P/V) report a clear bit, S is set only for a set
    /// bit 7, H is set, N cleared, C kept.
    fn bit_flags(&mut self, bit: u8, value: u8) {
        let set = value & (1 << bit) != 0;
        self.set_flag(Flag::Z, !set);
        self.set_flag(Flag::PV, !set);
        self.set_flag(Flag::S, bit == 7 && set);
        self.set_flag(Flag::H, true);
        self.set_flag(Flag::N, false);
    }

    pub(super) fn exec_bit<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Reg8) {
        let value = self.read_reg8(bus, target);
        self.bit_flags(bit, value);
    }

    pub(super) fn exec_res<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Reg8) {
        let value = self.read_reg8(bus, target);
        self.write_reg8(bus, target, value & !(1 << bit));
    }

    pub(super) fn exec_set<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Reg8) {
        let value = self.read_reg8(bus, target);
        self.write_reg8(bus, target, value | (1 << bit));
    }

    /// Write back an indexed CB result, also into `copy` for the
    /// undocumented register forms.
    fn index_writeback<B: Bus>(&mut self, bus: &mut B, addr: u16, copy: Option<Reg8>, value: u8) {
        bus.write8(addr, value);
        if let Some(reg) = copy {
            self.write_reg8_as(bus, reg, IndexMode::Hl, value);
        }
    }

    pub(super) fn exec_index_shift<B: Bus>(
        &mut self,
        bus: &mut B,
        op: ShiftOp,
        copy: Option<Reg8>,
    ) {
        let addr = self.indirect_addr(bus);
        let value = bus.read8(addr);
        let result = self.shift_result(op, value);
        self.index_writeback(bus, addr, copy, result);
    }

    pub(super) fn exec_index_bit<B: Bus>(&mut self, bus: &mut B, bit: u8) {
        let addr = self.indirect_addr(bus);
        let value = bus.read8(addr);
        self.bit_flags(bit, value);
    }

    pub(super) fn exec_index_res<B: Bus>(&mut self, bus: &mut B, bit: u8, copy: Option<Reg8>) {
        let addr = self.indirect_addr(bus);
        let value = bus.read8(addr) & !(1 << bit);
        self.index_writeback(bus, addr, copy, value);
    }

    pub(super) fn exec_index_set<B: Bus>(&mut self, bus: &mut B, bit: u8, copy: Option<Reg8>) {
        let addr = self.indirect_addr(bus);
        let value = bus.read8(addr) | (1 << bit);
        self.index_writeback(bus, addr, copy, value);
    }
}
