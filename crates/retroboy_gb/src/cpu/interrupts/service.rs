use super::super::bus::IF_ADDR;
use super::super::{Bus, Cpu};
use super::INTERRUPT_ENTRY_CYCLES;

impl Cpu {
    /// Handle maskable interrupts if IME is set and a pending interrupt exists.
    ///
    /// The driver calls this after each `step` (and after advancing the
    /// peripherals by the returned cycles). Returns `Some(cycles)` if an
    /// interrupt was taken, or `None` otherwise.
    pub fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        self.poll_pending_interrupt(bus)?;

        // IME is cleared immediately, then the current PC is pushed, and
        // only after that is the IF bit cleared and PC redirected.
        self.ime = false;
        self.cancel_ime_schedule();
        self.halted = false;

        let pc = self.regs.pc;
        let [hi, lo] = pc.to_be_bytes();

        // Push high byte of PC. This may write to `$FFFF` (IE) when SP was
        // 0, so the IE value used for interrupt selection must be sampled
        // *after* this write.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);

        let selection = self.select_interrupt_after_high_push(bus);

        // Push low byte of PC. Writes performed by this store must not
        // affect the interrupt selection for the current dispatch.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);

        match selection {
            Some((irq, new_if)) => {
                let vector = irq.vector().unwrap_or(0x0000);
                log::debug!(
                    "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
                    irq,
                    vector,
                    pc,
                    self.regs.sp,
                );
                bus.write8(IF_ADDR, new_if);
                self.regs.pc = vector;
            }
            None => {
                // No interrupt line remained pending after the high-byte
                // push: the dispatch is cancelled and PC falls back to 0x0000.
                self.regs.pc = 0x0000;
            }
        }

        Some(INTERRUPT_ENTRY_CYCLES)
    }
}
