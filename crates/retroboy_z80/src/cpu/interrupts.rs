use super::{Bus, Cpu};

/// NMI restart address.
pub const NMI_VECTOR: u16 = 0x0066;
/// Restart used by IM 1 (and by IM 0 when the device supplies `RST 38h`).
pub const IM1_VECTOR: u16 = 0x0038;

/// Cost of accepting an NMI in T-cycles.
pub const NMI_CYCLES: u32 = 11;
/// Cost of accepting a maskable interrupt in IM 0 (with an RST) or IM 1.
pub const IM_0_1_CYCLES: u32 = 13;
/// Cost of accepting a maskable interrupt in IM 2.
pub const IM_2_CYCLES: u32 = 19;

impl Cpu {
    /// Check the NMI and INT lines after an instruction and vector if one is
    /// accepted. Returns the cycles spent on the entry sequence.
    ///
    /// An NMI always wins. A maskable interrupt needs IFF1 set, and is held
    /// off for the instruction right after EI.
    pub fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if bus.take_nmi() {
            self.halted = false;
            self.regs.bump_r();
            self.iff2 = self.iff1;
            self.iff1 = false;
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = NMI_VECTOR;
            log::debug!("Z80: NMI accepted, return to 0x{ret:04X}");
            return Some(NMI_CYCLES);
        }

        if !self.iff1 || self.ei_shadow || !bus.int_line() {
            return None;
        }

        self.halted = false;
        self.iff1 = false;
        self.iff2 = false;
        self.regs.bump_r();

        let ret = self.regs.pc;
        let data = bus.int_ack();
        self.push_u16(bus, ret);

        let cycles = match self.im {
            2 => {
                let pointer = u16::from_be_bytes([self.regs.i, data & 0xFE]);
                self.regs.pc = self.read16(bus, pointer);
                IM_2_CYCLES
            }
            1 => {
                self.regs.pc = IM1_VECTOR;
                IM_0_1_CYCLES
            }
            _ => {
                // IM 0 executes the byte the device puts on the bus. Only
                // the RST family is supported.
                if data & 0xC7 == 0xC7 {
                    self.regs.pc = u16::from(data & 0x38);
                } else {
                    log::warn!("Z80: IM 0 data byte 0x{data:02X} is not an RST; using RST 38h");
                    self.regs.pc = IM1_VECTOR;
                }
                IM_0_1_CYCLES
            }
        };

        log::debug!(
            "Z80: INT accepted in IM {}, vector 0x{:04X}, return to 0x{ret:04X}",
            self.im,
            self.regs.pc
        );
        Some(cycles)
    }
}
