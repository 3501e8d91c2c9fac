mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::table::{Op, ShiftOp};
use super::{Bus, Cpu};

impl Cpu {
    /// Execute one decoded operation.
    ///
    /// Operands beyond the opcode byte are fetched here. The base cost comes
    /// from the table entry; anything variable is added to `extra_cycles`.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op) {
        match op {
            Op::Nop => {}
            Op::Stop => self.exec_stop(bus),
            Op::Halt => self.exec_halt(bus),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),

            Op::Ld { dst, src } => {
                let value = self.read_reg8(bus, src);
                self.write_reg8(bus, dst, value);
            }
            Op::LdImm8(dst) => {
                let value = self.fetch8(bus);
                self.write_reg8(bus, dst, value);
            }
            Op::LdImm16(dst) => {
                let value = self.fetch16(bus);
                self.regs.set16(dst, value);
            }
            Op::LdIndirectA(ind) => self.exec_ld_indirect_a(bus, ind),
            Op::LdAIndirect(ind) => self.exec_ld_a_indirect(bus, ind),
            Op::LdAbsSp => self.exec_ld_a16_sp(bus),
            Op::LdhImmA => self.exec_ldh_a8_a(bus),
            Op::LdhAImm => self.exec_ldh_a_a8(bus),
            Op::LdhCA => bus.write8(0xFF00 | self.regs.c as u16, self.regs.a),
            Op::LdhAC => self.regs.a = bus.read8(0xFF00 | self.regs.c as u16),
            Op::LdAbsA => {
                let addr = self.fetch16(bus);
                bus.write8(addr, self.regs.a);
            }
            Op::LdAAbs => {
                let addr = self.fetch16(bus);
                self.regs.a = bus.read8(addr);
            }
            Op::LdSpHl => self.regs.sp = self.regs.hl(),
            Op::LdHlSpImm => self.exec_ld_hl_sp_r8(bus),

            Op::Inc8(target) => self.exec_inc8(bus, target),
            Op::Dec8(target) => self.exec_dec8(bus, target),
            Op::Inc16(reg) => self.exec_inc16(reg),
            Op::Dec16(reg) => self.exec_dec16(reg),
            Op::AddHl(reg) => self.alu_add16_hl(self.regs.get16(reg)),
            Op::AddSpImm => self.exec_add_sp_r8(bus),
            Op::Alu { op, src } => {
                let value = self.read_reg8(bus, src);
                self.exec_alu(op, value);
            }
            Op::AluImm(op) => {
                let value = self.fetch8(bus);
                self.exec_alu(op, value);
            }
            Op::Rlca => self.exec_rotate_a(ShiftOp::Rlc),
            Op::Rrca => self.exec_rotate_a(ShiftOp::Rrc),
            Op::Rla => self.exec_rotate_a(ShiftOp::Rl),
            Op::Rra => self.exec_rotate_a(ShiftOp::Rr),
            Op::Daa => self.alu_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Jr => {
                self.jr(bus, true);
            }
            Op::JrCond(cc) => self.exec_jr_cc(bus, cc),
            Op::Jp => {
                self.jp(bus, true);
            }
            Op::JpCond(cc) => self.exec_jp_cc(bus, cc),
            Op::JpHl => self.regs.pc = self.regs.hl(),
            Op::Call => {
                self.call(bus, true);
            }
            Op::CallCond(cc) => self.exec_call_cc(bus, cc),
            Op::Ret => {
                self.ret(bus, true);
            }
            Op::RetCond(cc) => self.exec_ret_cc(bus, cc),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),
            Op::Push(reg) => self.exec_push(bus, reg),
            Op::Pop(reg) => self.exec_pop(bus, reg),

            // The step driver resolves the prefix before calling `execute`.
            Op::PrefixCb => {}
            Op::Shift { op, target } => self.exec_shift(bus, op, target),
            Op::Bit { bit, target } => self.exec_bit(bus, bit, target),
            Op::Res { bit, target } => self.exec_res(bus, bit, target),
            Op::Set { bit, target } => self.exec_set(bus, bit, target),

            Op::Invalid(opcode) => self.exec_invalid(opcode),
        }
    }
}
