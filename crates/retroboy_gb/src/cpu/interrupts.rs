mod ime;
mod poll;
mod service;

pub(super) use ime::ImeSchedule;

use bitflags::bitflags;

bitflags! {
    /// Interrupt sources as laid out in IE (`$FFFF`) and IF (`$FF0F`).
    ///
    /// Bit order doubles as priority order: bit 0 (VBlank) wins over every
    /// other pending source.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Interrupts: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl Interrupts {
    /// The highest-priority source in `self`, if any.
    #[inline]
    pub fn highest_priority(self) -> Option<Interrupts> {
        let bits = self.bits();
        if bits == 0 {
            None
        } else {
            Some(Interrupts::from_bits_truncate(1 << bits.trailing_zeros()))
        }
    }

    /// Vector address for a single source (`0x40 + 8 * bit`).
    ///
    /// For a combined set the highest-priority member's vector is returned.
    #[inline]
    pub fn vector(self) -> Option<u16> {
        self.highest_priority()
            .map(|irq| 0x0040 + (irq.bits().trailing_zeros() as u16) * 8)
    }
}

/// Cost of the interrupt entry sequence in T-cycles.
pub const INTERRUPT_ENTRY_CYCLES: u32 = 20;
