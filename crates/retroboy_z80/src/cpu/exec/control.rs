use crate::cpu::table::{
    CALL_TAKEN_EXTRA, DJNZ_TAKEN_EXTRA, JP_TAKEN_EXTRA, JR_TAKEN_EXTRA, RET_TAKEN_EXTRA,
};
use crate::cpu::{Bus, Cond, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, cc: Cond) {
        if self.jr(bus, self.condition(cc)) {
            self.extra_cycles += JR_TAKEN_EXTRA;
        }
    }

    /// DJNZ: decrement B and jump while it is non-zero. No flags change.
    pub(in crate::cpu) fn exec_djnz<B: Bus>(&mut self, bus: &mut B) {
        self.regs.b = self.regs.b.wrapping_sub(1);
        let taken = self.regs.b != 0;
        if self.jr(bus, taken) {
            self.extra_cycles += DJNZ_TAKEN_EXTRA;
        }
    }

    pub(in crate::cpu) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, cc: Cond) {
        if self.jp(bus, self.condition(cc)) {
            self.extra_cycles += JP_TAKEN_EXTRA;
        }
    }

    pub(in crate::cpu) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, cc: Cond) {
        if self.call(bus, self.condition(cc)) {
            self.extra_cycles += CALL_TAKEN_EXTRA;
        }
    }

    pub(in crate::cpu) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, cc: Cond) {
        if self.ret(bus, self.condition(cc)) {
            self.extra_cycles += RET_TAKEN_EXTRA;
        }
    }
}
