use super::Interrupts;

/// Address of the interrupt request register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Address of the interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;
/// Joypad register (P1), polled while the CPU is stopped.
pub const P1_ADDR: u16 = 0xFF00;

/// Abstraction over the Game Boy bus (memory and IO).
///
/// The CPU only ever talks to the bus through `read8`/`write8`. Peripheral
/// time is advanced by the driver via `tick` after each instruction, never
/// from inside the CPU.
pub trait Bus {
    /// Read a byte. Reads have no side effects on emulated state.
    fn read8(&mut self, addr: u16) -> u8;

    /// Write a byte. Writes into the IO page may trigger peripheral side
    /// effects (DMA, DIV reset, registered hooks) before returning.
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance bus-side peripherals by a given number of CPU cycles.
    ///
    /// Default implementation does nothing; system buses can override this
    /// to drive timers, LCD timing, etc.
    fn tick(&mut self, _cycles: u32) {}

    /// Set the given bits in IF.
    fn request_interrupt(&mut self, irq: Interrupts) {
        let current = self.read8(IF_ADDR);
        self.write8(IF_ADDR, current | irq.bits());
    }

    /// Interrupts that are both requested and enabled.
    fn pending_interrupts(&mut self) -> Interrupts {
        let ie = self.read8(IE_ADDR);
        let iflags = self.read8(IF_ADDR);
        Interrupts::from_bits_truncate(ie & iflags)
    }
}
