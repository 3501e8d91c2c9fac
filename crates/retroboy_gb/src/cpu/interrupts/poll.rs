use super::super::{Bus, Cpu};
use super::Interrupts;

impl Cpu {
    /// Decide whether a maskable interrupt should be serviced now.
    ///
    /// Returns the pending-and-enabled set when IME allows dispatch. As a
    /// side effect, a halted CPU with IME clear wakes up (without servicing)
    /// as soon as anything becomes pending.
    pub(in crate::cpu) fn poll_pending_interrupt<B: Bus>(
        &mut self,
        bus: &mut B,
    ) -> Option<Interrupts> {
        let pending = bus.pending_interrupts();
        if pending.is_empty() {
            return None;
        }

        if self.stopped {
            if !pending.contains(Interrupts::JOYPAD) {
                return None;
            }
            self.stopped = false;
        }

        // If the CPU is halted and an interrupt becomes pending while IME is
        // disabled, the CPU wakes up without servicing the interrupt.
        if self.halted && !self.ime {
            self.halted = false;
            return None;
        }

        if !self.ime {
            return None;
        }

        Some(pending)
    }

    /// Select the highest-priority pending interrupt *after* the high byte
    /// of PC has been pushed, but *before* the low byte is written.
    ///
    /// `IE` is evaluated after any effects of the high-byte push (when `SP`
    /// was 0 the high byte lands in `$FFFF`), so that push can cancel or
    /// retarget the dispatch. Returns the chosen source and the IF value with
    /// that source cleared.
    pub(in crate::cpu) fn select_interrupt_after_high_push<B: Bus>(
        &mut self,
        bus: &mut B,
    ) -> Option<(Interrupts, u8)> {
        let if_now = bus.read8(super::super::bus::IF_ADDR);
        let irq = bus.pending_interrupts().highest_priority()?;
        Some((irq, if_now & !irq.bits()))
    }
}
