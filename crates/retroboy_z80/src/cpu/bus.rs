/// Abstraction over a Z80 system: memory, I/O ports and interrupt lines.
///
/// Only `read8`/`write8` are required; the remaining methods default to an
/// idle system with nothing attached to the port space.
pub trait Bus {
    /// Read a byte. Reads have no side effects on emulated state.
    fn read8(&mut self, addr: u16) -> u8;

    fn write8(&mut self, addr: u16, value: u8);

    /// Advance bus-side peripherals by a given number of T-cycles.
    fn tick(&mut self, _cycles: u32) {}

    /// Read from the I/O port space. The high byte of `port` carries the
    /// upper register (A for `IN A,(n)`, B for the `(C)` forms).
    fn port_in(&mut self, _port: u16) -> u8 {
        0xFF
    }

    fn port_out(&mut self, _port: u16, _value: u8) {}

    /// Level of the maskable interrupt line (`/INT`).
    fn int_line(&mut self) -> bool {
        false
    }

    /// Return and clear a latched NMI edge.
    fn take_nmi(&mut self) -> bool {
        false
    }

    /// Byte placed on the data bus during the interrupt acknowledge cycle.
    /// IM 0 executes it as an RST; IM 2 uses it as the vector table index.
    fn int_ack(&mut self) -> u8 {
        0xFF
    }
}
