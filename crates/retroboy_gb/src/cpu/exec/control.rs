use crate::cpu::table::{CALL_TAKEN_EXTRA, JP_TAKEN_EXTRA, JR_TAKEN_EXTRA, RET_TAKEN_EXTRA};
use crate::cpu::{Bus, Cond, Cpu};

impl Cpu {
    pub(super) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, cc: Cond) {
        if self.jr(bus, self.condition(cc)) {
            self.extra_cycles += JR_TAKEN_EXTRA;
        }
    }

    pub(super) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, cc: Cond) {
        if self.jp(bus, self.condition(cc)) {
            self.extra_cycles += JP_TAKEN_EXTRA;
        }
    }

    pub(super) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, cc: Cond) {
        if self.call(bus, self.condition(cc)) {
            self.extra_cycles += CALL_TAKEN_EXTRA;
        }
    }

    pub(super) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, cc: Cond) {
        if self.ret(bus, self.condition(cc)) {
            self.extra_cycles += RET_TAKEN_EXTRA;
        }
    }
}
