use crate::cpu::table::AluOp;
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// Apply one of the eight accumulator ALU operations.
    pub(super) fn exec_alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.alu_sub(value, false, false),
            AluOp::Sbc => self.alu_sub(value, true, false),
            AluOp::And => self.alu_and(value),
            AluOp::Xor => self.alu_xor(value),
            AluOp::Or => self.alu_or(value),
            AluOp::Cp => self.alu_sub(value, false, true),
        }
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
    }
}
