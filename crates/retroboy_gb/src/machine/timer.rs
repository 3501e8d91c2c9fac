/// Timer / divider unit.
///
/// This models the behaviour described in Pandocs' "Timer and Divider
/// Registers" and "Timer obscure behaviour": TIMA increments on a falling
/// edge of the divider bit selected by TAC, and an overflow reloads TMA and
/// requests the timer interrupt one M-cycle later. Time advances only
/// through `tick_tcycle`; the register helpers in `io` apply writes without
/// advancing time.
mod io;

use crate::cpu::Interrupts;

/// T-cycles between a TIMA overflow and the TMA reload.
const OVERFLOW_RELOAD_DELAY: u8 = 4;

#[derive(Debug)]
pub(super) struct Timer {
    /// Hidden 16-bit system counter, incremented every T-cycle; DIV
    /// exposes its upper byte.
    pub(super) internal_counter: u16,
    /// TIMA (FF05).
    pub(super) tima: u8,
    /// TMA (FF06).
    pub(super) tma: u8,
    /// TAC raw value (lower 3 bits meaningful).
    pub(super) tac: u8,
    /// T-cycles left until a pending overflow reloads TIMA from TMA and
    /// requests the timer interrupt. Zero when no overflow is pending.
    pub(super) overflow_delay: u8,
    /// Cached "timer enabled" flag derived from TAC.
    pub(super) enabled: bool,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            internal_counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            overflow_delay: 0,
            enabled: false,
        }
    }

    /// Initialise timer to DMG/MGB power-on state.
    ///
    /// DIV reads back as 0xAB at PC=0x0100, as described in Pandocs.
    pub(super) fn init_dmg(&mut self) {
        self.internal_counter = 0xABCC;
        self.tima = 0x00;
        self.tma = 0x00;
        self.tac = 0x00;
        self.overflow_delay = 0;
        self.enabled = false;
    }

    #[cfg(test)]
    pub(super) fn overflow_pending(&self) -> bool {
        self.overflow_delay != 0
    }

    /// Return the currently selected timer input bit of the internal
    /// counter based on TAC[1:0]. The mapping is:
    /// - 00 → bit 9 (4096 Hz)
    /// - 01 → bit 3 (262144 Hz)
    /// - 10 → bit 5 (65536 Hz)
    /// - 11 → bit 7 (16384 Hz)
    #[inline]
    pub(super) fn counter_bit(&self) -> bool {
        let mask = match self.tac & 0x03 {
            0x00 => 1u16 << 9,
            0x01 => 1u16 << 3,
            0x02 => 1u16 << 5,
            _ => 1u16 << 7,
        };
        (self.internal_counter & mask) != 0
    }

    /// Increment TIMA by one and track overflow.
    #[inline]
    pub(super) fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        if overflow {
            // TIMA reads 0x00 until the reload.
            self.overflow_delay = OVERFLOW_RELOAD_DELAY;
        }
    }

    /// Advance timer by one T-cycle, OR-ing the timer request into `if_reg`.
    pub(super) fn tick_tcycle(&mut self, if_reg: &mut u8) {
        if self.overflow_delay != 0 {
            self.overflow_delay -= 1;
            if self.overflow_delay == 0 {
                self.tima = self.tma;
                *if_reg |= Interrupts::TIMER.bits();
            }
        }

        let old_bit = self.enabled && self.counter_bit();
        self.internal_counter = self.internal_counter.wrapping_add(1);
        if old_bit && !self.counter_bit() {
            self.increment_tima();
        }
    }
}
