use super::Timer;

impl Timer {
    #[inline]
    pub(in super::super) fn div(&self) -> u8 {
        (self.internal_counter >> 8) as u8
    }

    #[inline]
    pub(in super::super) fn tac_read(&self) -> u8 {
        self.tac | 0b1111_1000
    }

    /// DIV write.
    ///
    /// Writing any value to DIV resets the internal counter. On DMG this
    /// can cause a single TIMA increment when the selected divider bit
    /// falls from 1 to 0 due to the reset.
    pub(in super::super) fn div_write(&mut self) {
        if self.enabled && self.counter_bit() {
            self.increment_tima();
        }
        self.internal_counter = 0;
    }

    /// TIMA write.
    ///
    /// Writing TIMA while an overflow is pending cancels the reload and
    /// the interrupt.
    pub(in super::super) fn tima_write(&mut self, value: u8) {
        self.tima = value;
        self.overflow_delay = 0;
    }

    /// TMA write.
    ///
    /// During the overflow/reload window the new TMA value is also what
    /// TIMA gets reloaded with.
    pub(in super::super) fn tma_write(&mut self, value: u8) {
        self.tma = value;
    }

    /// TAC write.
    ///
    /// On DMG, disabling the timer or switching the clock source while
    /// the selected input bit is 1 triggers a single TIMA increment.
    pub(in super::super) fn tac_write(&mut self, value: u8) {
        let old_bit = self.enabled && self.counter_bit();
        self.tac = value & 0x07;
        self.enabled = (self.tac & 0x04) != 0;
        let new_bit = self.enabled && self.counter_bit();
        if old_bit && !new_bit {
            self.increment_tima();
        }
    }
}
