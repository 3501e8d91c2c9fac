use crate::cpu::interrupts::ImeSchedule;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        // STOP is officially a 2-byte instruction; the second byte is
        // often 0 and ignored.
        let _padding = self.fetch8(bus);

        // Enter STOP low-power mode. The step driver polls P1 ($FF00) and
        // interrupt polling watches for a pending joypad interrupt.
        self.stopped = true;
        self.halted = false;
    }

    /// HALT, including the HALT bug.
    ///
    /// With IME clear and an interrupt already pending the CPU does not
    /// halt; instead the next opcode fetch fails to advance PC.
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) {
        if !self.ime && !bus.pending_interrupts().is_empty() {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.cancel_ime_schedule();
    }

    pub(super) fn exec_ei(&mut self) {
        // IME becomes 1 after the *next* instruction completes. A second EI
        // inside that window must not restart it.
        if !self.ime && self.ime_schedule == ImeSchedule::Idle {
            self.ime_schedule = ImeSchedule::Requested;
        }
    }

    /// Opcode holes (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD).
    ///
    /// Hardware hard-locks on these; here they execute as a no-op so a
    /// stray jump never stops the emulator.
    pub(super) fn exec_invalid(&mut self, opcode: u8) {
        self.invalid_opcodes += 1;
        log::warn!(
            "GB CPU invalid opcode 0x{opcode:02X} at PC=0x{pc:04X} \
             (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
            opcode = opcode,
            pc = self.instr_addr,
            sp = self.regs.sp,
            af = self.regs.af(),
            bc = self.regs.bc(),
            de = self.regs.de(),
            hl = self.regs.hl(),
        );
    }
}
