mod alu;
mod block;
mod control;
mod incdec;
mod io;
mod ld;
mod stack;
mod system;

use super::table::{AluOp, Op, ShiftOp};
use super::{Bus, Cpu, IndexMode, Reg16};

impl Cpu {
    /// Execute one decoded operation. Prefix bytes and the `(IX+d)` address
    /// of `DD CB`/`FD CB` forms have already been consumed by the step
    /// driver.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op) {
        match op {
            Op::Nop => {}
            Op::Halt => self.exec_halt(),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),

            // Loads and exchanges.
            Op::Ld { dst, src } => {
                // With a memory operand, the register side keeps plain H/L.
                let map = if dst.is_indirect() || src.is_indirect() {
                    IndexMode::Hl
                } else {
                    self.mode
                };
                let value = self.read_reg8_as(bus, src, map);
                self.write_reg8_as(bus, dst, map, value);
            }
            Op::LdImm8(reg) => self.exec_ld_imm8(bus, reg),
            Op::LdImm16(reg) => {
                let value = self.fetch16(bus);
                self.set_reg16(reg, value);
            }
            Op::LdBcA => bus.write8(self.regs.bc(), self.regs.a),
            Op::LdDeA => bus.write8(self.regs.de(), self.regs.a),
            Op::LdABc => self.regs.a = bus.read8(self.regs.bc()),
            Op::LdADe => self.regs.a = bus.read8(self.regs.de()),
            Op::LdAbsA => {
                let addr = self.fetch16(bus);
                bus.write8(addr, self.regs.a);
            }
            Op::LdAAbs => {
                let addr = self.fetch16(bus);
                self.regs.a = bus.read8(addr);
            }
            Op::LdAbsHl => self.exec_ld_abs_rp(bus, Reg16::HL),
            Op::LdHlAbs => self.exec_ld_rp_abs(bus, Reg16::HL),
            Op::LdSpHl => self.regs.sp = self.hl_like(),
            Op::ExAfAf => self.regs.swap_af(),
            Op::Exx => self.regs.exx(),
            Op::ExDeHl => {
                let de = self.regs.de();
                self.regs.set_de(self.regs.hl());
                self.regs.set_hl(de);
            }
            Op::ExSpHl => self.exec_ex_sp_hl(bus),

            // Arithmetic.
            Op::Inc8(reg) => self.exec_inc8(bus, reg),
            Op::Dec8(reg) => self.exec_dec8(bus, reg),
            Op::Inc16(reg) => self.exec_inc16(reg),
            Op::Dec16(reg) => self.exec_dec16(reg),
            Op::AddHl(reg) => {
                let value = self.reg16(reg);
                let result = self.alu_add16(self.hl_like(), value);
                self.set_hl_like(result);
            }
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

            // Control flow.
            Op::Djnz => self.exec_djnz(bus),
            Op::Jr => {
                self.jr(bus, true);
            }
            Op::JrCond(cc) => self.exec_jr_cc(bus, cc),
            Op::Jp => {
                self.jp(bus, true);
            }
            Op::JpCond(cc) => self.exec_jp_cc(bus, cc),
            Op::JpHl => self.regs.pc = self.hl_like(),
            Op::Call => {
                self.call(bus, true);
            }
            Op::CallCond(cc) => self.exec_call_cc(bus, cc),
            Op::Ret => {
                self.ret(bus, true);
            }
            Op::RetCond(cc) => self.exec_ret_cc(bus, cc),
            Op::Rst(vector) => self.exec_rst(bus, vector),
            Op::Push(reg) => self.exec_push(bus, reg),
            Op::Pop(reg) => self.exec_pop(bus, reg),

            // Ports.
            Op::OutImmA => self.exec_out_imm_a(bus),
            Op::InAImm => self.exec_in_a_imm(bus),

            // Prefixes are resolved by the step driver. One only reaches
            // here when a following DD/FD prefix supersedes it.
            Op::PrefixCb | Op::PrefixEd | Op::PrefixIx | Op::PrefixIy | Op::PrefixIndexCb => {}

            // CB group.
            Op::Shift { op, target } => self.exec_shift(bus, op, target),
            Op::Bit { bit, target } => self.exec_bit(bus, bit, target),
            Op::Res { bit, target } => self.exec_res(bus, bit, target),
            Op::Set { bit, target } => self.exec_set(bus, bit, target),
            Op::IndexShift { op, copy } => self.exec_index_shift(bus, op, copy),
            Op::IndexBit(bit) => self.exec_index_bit(bus, bit),
            Op::IndexRes { bit, copy } => self.exec_index_res(bus, bit, copy),
            Op::IndexSet { bit, copy } => self.exec_index_set(bus, bit, copy),

            // ED group.
            Op::InC(reg) => self.exec_in_c(bus, reg),
            Op::OutC(reg) => self.exec_out_c(bus, reg),
            Op::SbcHl(reg) => {
                let value = self.regs.get16(reg);
                self.alu_sbc16(value);
            }
            Op::AdcHl(reg) => {
                let value = self.regs.get16(reg);
                self.alu_adc16(value);
            }
            Op::LdAbsRp(reg) => self.exec_ld_abs_rp(bus, reg),
            Op::LdRpAbs(reg) => self.exec_ld_rp_abs(bus, reg),
            Op::Neg => self.alu_neg(),
            Op::Retn | Op::Reti => self.exec_retn(bus),
            Op::Im(mode) => self.im = mode,
            Op::LdIA => self.regs.i = self.regs.a,
            Op::LdRA => self.regs.r = self.regs.a,
            Op::LdAI => self.exec_ld_a_special(self.regs.i),
            Op::LdAR => self.exec_ld_a_special(self.regs.r),
            Op::Rrd => self.exec_rrd(bus),
            Op::Rld => self.exec_rld(bus),
            Op::Block { op, increment, repeat } => self.exec_block(bus, op, increment, repeat),

            Op::Invalid(opcode) => self.exec_invalid(opcode),
        }
    }

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
}
